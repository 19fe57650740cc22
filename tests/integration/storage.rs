//! Config-driven storage binding and the file-level helpers

use std::fs;
use std::path::PathBuf;

use flecha::runtime::{Heap, Layout, MemoryError, Storage, StorageBinder};
use flecha::util::config::{load_config, FlechaConfig};
use flecha::frontend::CompileError;
use flecha::frontend::lexer::LexError;
use flecha::{check_file, parse_file, parse_source, tokenize_file};
use tempfile::TempDir;

fn create_test_file(
    dir: &TempDir,
    name: &str,
    content: &str,
) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_configured_sizes_drive_binding() {
    let config = FlechaConfig::from_toml_str(
        "[memory]\nheap_limit = 64\n[memory.sizes]\nint = 8\nstring = 32\n",
    )
    .unwrap();
    let program = parse_source(":m int! a = allot(int); string! s = allot(string);").unwrap();

    let mut binder = StorageBinder::new(
        Heap::new(config.memory.heap_limit),
        Layout::from_sizes(&config.memory.sizes),
    );
    let sizes: Vec<_> = binder
        .bind(&program)
        .unwrap()
        .iter()
        .map(|b| b.size)
        .collect();
    assert_eq!(sizes, [8, 32]);
    assert_eq!(binder.storage().live_bytes(), 40);

    binder.release_all().unwrap();
    assert_eq!(binder.storage().live_bytes(), 0);
}

#[test]
fn test_heap_limit_from_config() {
    let config = FlechaConfig::from_toml_str("[memory]\nheap_limit = 4").unwrap();
    let program = parse_source(":m int! a = allot(int); char! c = allot(char);").unwrap();
    let mut binder = StorageBinder::new(
        Heap::new(config.memory.heap_limit),
        Layout::from_sizes(&config.memory.sizes),
    );
    assert!(matches!(
        binder.bind(&program),
        Err(MemoryError::OutOfMemory { requested: 1, live: 4, limit: 4 })
    ));
}

#[test]
fn test_check_file_reports_bindings() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(
        &dir,
        "main.fl",
        ":main\nint! a = allot(int) -> 1;\nbool! ok = allot(bool);\n",
    );

    let bindings = check_file(&file, &FlechaConfig::default()).unwrap();
    assert_eq!(bindings.len(), 2);
    assert_eq!(bindings[1].variable, "ok");
    assert_eq!(bindings[1].size, 1);
}

#[test]
fn test_check_file_rejects_user_defined_allot() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "node.fl", ":main Node! n = allot(Node);");
    let err = check_file(&file, &FlechaConfig::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<MemoryError>(),
        Some(MemoryError::UnknownLayout(name)) if name == "Node"
    ));
}

#[test]
fn test_parse_file_and_missing_file() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "ok.fl", ":main int! x = 1;");
    assert_eq!(parse_file(&file).unwrap().statements().len(), 1);

    let missing = dir.path().join("missing.fl");
    let err = parse_file(&missing).unwrap_err();
    assert!(err.to_string().starts_with("Failed to read file"));
}

#[test]
fn test_parse_file_error_shows_offending_line() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "bad.fl", ":main\nint! x = 5\n");
    let err = parse_file(&file).unwrap_err();

    let context = err.to_string();
    assert!(context.starts_with("Failed to parse: "));
    assert!(context.contains("bad.fl:3:1"));
    assert!(context.ends_with("   3 | \n     | ^"));
    assert!(matches!(
        err.downcast_ref::<CompileError>(),
        Some(CompileError::Parse(_))
    ));
}

#[test]
fn test_tokenize_file_error_shows_offending_line() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "lex.fl", ":main char! c = 'ab';");
    let err = tokenize_file(&file).unwrap_err();

    assert!(err
        .to_string()
        .ends_with("   1 | :main char! c = 'ab';\n     |                 ^"));
    assert!(matches!(
        err.downcast_ref::<LexError>(),
        Some(LexError::InvalidCharacterLiteral { .. })
    ));
}

#[test]
fn test_load_config_from_file() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(&dir, "flecha.toml", "[log]\nlevel = \"warn\"\n");
    let config = load_config(&file).unwrap();
    assert_eq!(config.log.level.to_string(), "warn");
    assert_eq!(config.memory, FlechaConfig::default().memory);
}
