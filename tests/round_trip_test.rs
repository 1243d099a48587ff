mod helpers;

use std::fs::File;
use std::io::BufWriter;

use embedeval::embedding::binary::write_binary;
use embedeval::embedding::text::write_text;
use embedeval::embedding::{load_embedding, Embedding, Format};
use embedeval::error::ParseError;
use tempfile::TempDir;

fn awkward_embedding() -> Embedding {
    Embedding::from_pairs(
        "source",
        vec![
            ("zero".to_string(), vec![0.0, -0.0, 0.0]),
            ("tiny".to_string(), vec![1e-38, 3.4e38, -1.5e-7]),
            ("thirds".to_string(), vec![1.0 / 3.0, 2.0 / 3.0, -1.0 / 3.0]),
            ("größe".to_string(), vec![0.1, 0.2, 0.3]),
        ],
    )
    .unwrap()
}

#[test]
fn text_round_trip_is_lossless() {
    let tmp = TempDir::new().unwrap();
    let original = awkward_embedding();
    let path = tmp.path().join("out.txt");
    write_text(&original, BufWriter::new(File::create(&path).unwrap())).unwrap();

    let parsed = load_embedding(&path, Format::Text).unwrap();
    assert_eq!(parsed, original);
    assert_eq!(parsed.words(), original.words());
}

#[test]
fn binary_round_trip_is_lossless() {
    let tmp = TempDir::new().unwrap();
    let original = awkward_embedding();
    let path = tmp.path().join("out.bin");
    write_binary(&original, BufWriter::new(File::create(&path).unwrap())).unwrap();

    let parsed = load_embedding(&path, Format::Binary).unwrap();
    assert_eq!(parsed, original);
}

#[test]
fn text_converts_to_binary() {
    let tmp = TempDir::new().unwrap();
    let text_path = helpers::write_text_embedding(
        &tmp,
        "in.txt",
        "
        2 2
        king 0.5 1.5
        queen -0.5 2.5
        ",
    );
    let from_text = load_embedding(&text_path, Format::Text).unwrap();

    let bin_path = tmp.path().join("out.bin");
    write_binary(&from_text, File::create(&bin_path).unwrap()).unwrap();
    let from_binary = load_embedding(&bin_path, Format::Binary).unwrap();

    assert_eq!(from_binary, from_text);
    assert_eq!(from_binary.path(), bin_path.as_path());
}

#[test]
fn words_neither_format_can_store_are_rejected_up_front() {
    let err = Embedding::from_pairs(
        "source",
        vec![
            ("new york".to_string(), vec![1.0]),
            (String::new(), vec![2.0]),
        ],
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::WhitespaceInWord { ref word, record: 0 } if word == "new york"));

    let err = Embedding::from_pairs(
        "source",
        vec![("york".to_string(), vec![1.0]), (String::new(), vec![2.0])],
    )
    .unwrap_err();
    assert!(matches!(err, ParseError::EmptyWord { record: 1 }));
}
