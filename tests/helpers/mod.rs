#![allow(dead_code)]

use std::path::{Path, PathBuf};

use embedeval::embedding::Embedding;
use tempfile::TempDir;

/// Write a text embedding file into `dir`. Leading indentation of every line is removed.
pub fn write_text_embedding(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let body: Vec<&str> = content
        .trim()
        .lines()
        .map(|line| line.trim_start())
        .collect();
    let path = dir.path().join(name);
    std::fs::write(&path, body.join("\n")).unwrap();
    path
}

/// Encode one binary record: `<word> <f32 le>...`.
pub fn binary_record(word: &str, values: &[f32]) -> Vec<u8> {
    let mut out = word.as_bytes().to_vec();
    out.push(b' ');
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
    out
}

/// Write a binary embedding file with the given header and records.
pub fn write_binary_embedding(
    dir: &TempDir,
    name: &str,
    header: &str,
    records: &[(&str, &[f32])],
) -> PathBuf {
    let mut bytes = format!("{header}\n").into_bytes();
    for (word, values) in records {
        bytes.extend(binary_record(word, values));
    }
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Write a plugin manifest at `dir/relative`, creating parent directories.
pub fn write_manifest(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}

/// Small embedding in which the Game of Thrones built-in tasks pass.
pub fn got_embedding() -> Embedding {
    let pairs: Vec<(String, Vec<f32>)> = [
        ("Eddard", [1.0, 0.0, 0.0]),
        ("Catelyn", [0.9, 0.1, 0.0]),
        ("Rob", [1.0, 0.1, 0.0]),
        ("Sansa", [0.95, 0.05, 0.0]),
        ("Riverrun", [0.0, 0.0, 1.0]),
        ("Stark", [1.0, 1.0, 0.0]),
        ("Jaime", [0.0, 0.0, 1.0]),
        ("Lannister", [0.0, 1.0, 1.0]),
    ]
    .iter()
    .map(|(w, v)| (w.to_string(), v.to_vec()))
    .collect();
    Embedding::from_pairs("got.txt", pairs).unwrap()
}
