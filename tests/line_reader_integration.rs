use std::io::Cursor;
use anyhow::Result;
use prompted_line::{InputHandler, LineReader, OverflowPolicy, ReadError, ReaderConfig};

const CAPACITY: usize = 1024;

fn read_one(input: &[u8], config: ReaderConfig) -> Result<(Vec<u8>, Vec<u8>)> {
    let mut lines = LineReader::with_config(Cursor::new(input.to_vec()), Vec::new(), config)?;
    let line = lines.read_prompted_line("> ")?.into_bytes();
    let (_, output) = lines.into_inner();
    Ok((line, output))
}

#[test]
fn test_lines_shorter_than_capacity_round_trip() -> Result<()> {
    for s in ["", "a", "hello world", "tab\tseparated", "trailing space "] {
        let mut input = s.as_bytes().to_vec();
        input.push(b'\n');

        let (line, output) = read_one(&input, ReaderConfig::default())?;
        assert_eq!(line, s.as_bytes());
        assert_eq!(output, b"> ");
    }
    Ok(())
}

#[test]
fn test_long_lines_are_truncated_to_capacity() -> Result<()> {
    for len in [CAPACITY - 1, CAPACITY, CAPACITY + 1, 3 * CAPACITY] {
        let s: Vec<u8> = (0..len).map(|i| b'a' + (i % 26) as u8).collect();
        let mut input = s.clone();
        input.push(b'\n');

        let (line, _) = read_one(&input, ReaderConfig::default())?;
        assert_eq!(line, &s[..CAPACITY - 1]);
    }
    Ok(())
}

#[test]
fn test_immediate_end_of_input() -> Result<()> {
    let (line, output) = read_one(b"", ReaderConfig::default())?;
    assert!(line.is_empty());
    assert_eq!(output, b"> ");
    Ok(())
}

#[test]
fn test_reject_then_continue() -> Result<()> {
    let config = ReaderConfig::new(8, OverflowPolicy::Reject)?;
    let mut lines = LineReader::with_config(
        Cursor::new(b"this line is too long\nshort\n".to_vec()),
        Vec::new(),
        config,
    )?;

    assert!(matches!(
        lines.read_prompted_line(""),
        Err(ReadError::LineTooLong { capacity: 8 })
    ));
    assert_eq!(lines.get_user_input("")?.as_bytes(), b"short");
    Ok(())
}

#[test]
fn test_grow_has_no_limit() -> Result<()> {
    let s = vec![b'z'; 10 * CAPACITY];
    let mut input = s.clone();
    input.push(b'\n');

    let (line, _) = read_one(&input, ReaderConfig::new(CAPACITY, OverflowPolicy::Grow)?)?;
    assert_eq!(line, s);
    Ok(())
}

#[test]
fn test_invalid_config_rejected_by_reader() {
    let config = ReaderConfig {
        capacity: 0,
        overflow: OverflowPolicy::Truncate,
    };
    let result = LineReader::with_config(Cursor::new(Vec::new()), Vec::new(), config);
    assert!(matches!(result, Err(ReadError::InvalidCapacity(0))));
}
