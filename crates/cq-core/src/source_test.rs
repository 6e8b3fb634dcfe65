use super::*;
use rust_embed::RustEmbed;
use tempfile::TempDir;

#[test]
fn test_dir_source_lists_files_only() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("1_first.cql"), "SELECT 1;").unwrap();
    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
    std::fs::create_dir(dir.path().join("subdir")).unwrap();

    let source = DirSource::new(dir.path());
    let mut names: Vec<String> = source.scan().unwrap().into_iter().map(|f| f.name).collect();
    names.sort();
    assert_eq!(names, vec!["1_first.cql", "notes.txt"]);
}

#[test]
fn test_dir_source_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let source = DirSource::new(dir.path().join("missing"));
    assert!(matches!(source.scan(), Err(CoreError::Discovery { .. })));
}

#[test]
fn test_dir_source_file_path_is_not_a_directory() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("1_first.cql");
    std::fs::write(&file, "SELECT 1;").unwrap();

    let source = DirSource::new(&file);
    assert!(matches!(source.scan(), Err(CoreError::Discovery { .. })));
}

#[test]
fn test_dir_source_reads_by_locator() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("1_first.cql"), "CREATE TABLE t (id int);").unwrap();

    let source = DirSource::new(dir.path());
    let files = source.scan().unwrap();
    let content = source.read(&files[0].locator).unwrap();
    assert_eq!(content, "CREATE TABLE t (id int);");
}

#[derive(RustEmbed)]
#[folder = "testdata/embedded"]
struct TestAssets;

#[test]
fn test_embedded_source_scans_bundle() {
    let source: EmbeddedSource<TestAssets> = EmbeddedSource::new("");
    let mut names: Vec<String> = source.scan().unwrap().into_iter().map(|f| f.name).collect();
    names.sort();
    assert_eq!(names, vec!["1_init.cql", "2_add_index.cql", "notes.txt"]);
}

#[test]
fn test_embedded_source_reads_by_locator() {
    let source: EmbeddedSource<TestAssets> = EmbeddedSource::new("");
    let files = source.scan().unwrap();
    let init = files.iter().find(|f| f.name == "1_init.cql").unwrap();
    let content = source.read(&init.locator).unwrap();
    assert!(content.contains("CREATE TABLE"));
}

#[test]
fn test_embedded_source_unknown_locator_fails() {
    let source: EmbeddedSource<TestAssets> = EmbeddedSource::new("");
    assert!(matches!(
        source.read("99_missing.cql"),
        Err(CoreError::ScriptRead { .. })
    ));
}
