use std::fs;
use std::io::Write;
use std::sync::Arc;

use tempfile::NamedTempFile;
use toon_loader::{Error, Options, ToonLoader, Value};

fn fixture(content: &str) -> Result<NamedTempFile, Box<dyn std::error::Error>> {
    let mut tmp = NamedTempFile::new()?;
    write!(tmp, "{}", content)?;
    tmp.flush()?;
    Ok(tmp)
}

#[test]
fn second_load_is_served_from_cache() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = fixture("a: 1\n")?;
    let mut loader = ToonLoader::new();

    let first = loader.load(tmp.path())?;
    fs::write(tmp.path(), "a: 2\n")?;
    let second = loader.load(tmp.path())?;

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first, second);
    assert_eq!(second.get("a"), Some(&Value::Int(1)));
    assert_eq!(loader.cached_len(), 1);
    Ok(())
}

#[test]
fn cached_document_survives_file_removal() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = fixture("a: 1\n")?;
    let path = tmp.path().to_path_buf();
    let mut loader = ToonLoader::new();
    loader.load(&path)?;
    drop(tmp);
    assert!(!path.exists());
    assert_eq!(loader.load(&path)?.get("a"), Some(&Value::Int(1)));
    Ok(())
}

#[test]
fn clear_cache_forces_reparse() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = fixture("a: 1\n")?;
    let mut loader = ToonLoader::new();
    let before = loader.load(tmp.path())?;

    fs::write(tmp.path(), "a: 2\n")?;
    loader.clear_cache();
    assert_eq!(loader.cached_len(), 0);
    assert!(!loader.is_cached(tmp.path()));

    let after = loader.load(tmp.path())?;
    assert_eq!(after.get("a"), Some(&Value::Int(2)));
    // Documents handed out earlier are unaffected.
    assert_eq!(before.get("a"), Some(&Value::Int(1)));
    Ok(())
}

#[test]
fn reload_refreshes_one_entry() -> Result<(), Box<dyn std::error::Error>> {
    let one = fixture("v: 1\n")?;
    let two = fixture("v: 10\n")?;
    let mut loader = ToonLoader::new();
    loader.load(one.path())?;
    loader.load(two.path())?;

    fs::write(one.path(), "v: 2\n")?;
    assert_eq!(loader.reload(one.path())?.get("v"), Some(&Value::Int(2)));
    assert_eq!(loader.load(one.path())?.get("v"), Some(&Value::Int(2)));
    assert_eq!(loader.cached_len(), 2);
    Ok(())
}

#[test]
fn different_spellings_share_one_entry() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    fs::create_dir(dir.path().join("sub"))?;
    let file = dir.path().join("prices.toon");
    fs::write(&file, "a: 1\n")?;
    let mut loader = ToonLoader::new();
    let a = loader.load(&file)?;
    let b = loader.load(dir.path().join("sub").join("..").join("prices.toon"))?;
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(loader.cached_len(), 1);
    Ok(())
}

#[test]
fn cache_can_be_disabled() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = fixture("a: 1\n")?;
    let mut loader = ToonLoader::with_options(Options {
        cache: false,
        ..Options::default()
    });
    loader.load(tmp.path())?;
    fs::write(tmp.path(), "a: 2\n")?;
    assert_eq!(loader.load(tmp.path())?.get("a"), Some(&Value::Int(2)));
    assert_eq!(loader.cached_len(), 0);
    Ok(())
}

#[test]
fn missing_file_propagates() {
    let dir = tempfile::tempdir().unwrap();
    let mut loader = ToonLoader::new();
    let err = loader.load(dir.path().join("absent.toon")).unwrap_err();
    match err {
        Error::Read { source, .. } => assert_eq!(source.kind(), std::io::ErrorKind::NotFound),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn load_table_absent_or_not_array_is_empty() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = fixture("t[1]{a}:\n  1\nscalar: 3\n")?;
    let mut loader = ToonLoader::new();
    assert_eq!(loader.load_table(tmp.path(), "t")?.len(), 1);
    assert!(loader.load_table(tmp.path(), "scalar")?.is_empty());
    assert!(loader.load_table(tmp.path(), "nope")?.is_empty());
    Ok(())
}

#[test]
fn strict_loader_reports_syntax_with_line() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = fixture("a: 1\noops\n")?;
    let mut loader = ToonLoader::with_options(Options {
        strict: true,
        ..Options::default()
    });
    let err = loader.load(tmp.path()).unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert!(!loader.is_cached(tmp.path()));
    Ok(())
}
