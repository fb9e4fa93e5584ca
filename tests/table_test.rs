//! Table compilation through the public API.

use tblasm::core::{escape_token, TableCompiler};
use tblasm::{compile_table, compile_table_with_escapes, TableError};

#[test]
fn bare_and_prefixed_values() {
    let table = compile_table("font.tbl", ["A=41", "b=0x62", "c=0XA", "d=7"]).unwrap();
    assert_eq!(table.get("A"), Some(0x41));
    assert_eq!(table.get("b"), Some(0x62));
    assert_eq!(table.get("c"), Some(0x0A));
    assert_eq!(table.get("d"), Some(0x07));
    assert_eq!(table.len(), 4);
}

#[test]
fn lookups_are_case_sensitive() {
    let table = compile_table("font.tbl", ["a=01"]).unwrap();
    assert_eq!(table.get("A"), None);
    assert!(table.contains("a"));
}

#[test]
fn first_bad_line_aborts_compilation() {
    let err = compile_table("font.tbl", ["A=41", "B=zz", "C=43"]).unwrap_err();
    assert_eq!(
        err,
        TableError::Parse {
            source_name: "font.tbl".into(),
            line_no: 2,
            line: "B=zz".into(),
        }
    );
    assert_eq!(
        err.to_string(),
        "Error while parsing \"B=zz\" in file \"font.tbl\" (line 2)"
    );
}

#[test]
fn duplicate_user_token() {
    let err = compile_table("font.tbl", ["A=41", "B=42", "A=61"]).unwrap_err();
    assert_eq!(
        err,
        TableError::DuplicateToken {
            source_name: "font.tbl".into(),
            line_no: Some(3),
            token: "A".into(),
        }
    );
}

#[test]
fn user_token_colliding_with_escape_code() {
    let err = compile_table_with_escapes("font.tbl", ["\\h41=01"]).unwrap_err();
    assert_eq!(
        err,
        TableError::DuplicateToken {
            source_name: "font.tbl".into(),
            line_no: None,
            token: "\\h41".into(),
        }
    );
    assert!(err.to_string().contains("escape code"));
}

#[test]
fn lowercase_escape_spelling_does_not_collide() {
    let table = compile_table_with_escapes("font.tbl", ["\\hff=01"]).unwrap();
    assert_eq!(table.get("\\hff"), Some(0x01));
    assert_eq!(table.get("\\hFF"), Some(0xFF));
}

#[test]
fn escape_codes_cover_every_byte() {
    let table = compile_table_with_escapes("font.tbl", ["A=41", "[END]=FF"]).unwrap();
    assert!(table.has_escape_codes());
    assert_eq!(table.len(), 2 + 256);
    assert_eq!(table.get("\\h00"), Some(0));
    assert_eq!(table.get("\\hFF"), Some(255));
    for value in 0..=u8::MAX {
        assert_eq!(table.get(&escape_token(value)), Some(value));
    }
}

#[test]
fn compiler_can_be_fed_incrementally() {
    let mut compiler = TableCompiler::new("split.tbl");
    compiler.add_line("A=01").unwrap();
    compiler.add_lines(["B=02", "C=03"]).unwrap();
    assert_eq!(compiler.source_name(), "split.tbl");

    let table = compiler.finish();
    let mut entries: Vec<_> = table.iter().collect();
    entries.sort();
    assert_eq!(entries, vec![("A", 1), ("B", 2), ("C", 3)]);
}

#[test]
fn empty_table_is_valid() {
    let table = compile_table("empty.tbl", Vec::<String>::new()).unwrap();
    assert!(table.is_empty());
    assert_eq!(table.max_token_chars(), 0);
}
