use crate::common::{issued, position, session, session_with, Record};
use dbgsync::config::Config;
use dbgsync::gateway::mi;
use dbgsync::model::{ExecutionState, FramePayload, Language, SourceFile};
use dbgsync::session::event::Response;
use dbgsync::store::keys::{Binary, CachedSourceFiles, FetchingSourceFiles, SourceFilePaths};
use dbgsync::store::Store;
use dbgsync::SessionBuilder;

#[test]
fn test_load_binary_order() {
    let (mut session, journal) = session();
    session.notify_paused(FramePayload::EMPTY.with_line("3"));
    let tag = session.tag();
    session.apply_response(
        tag,
        Response::SourceFilePaths(vec!["/old/main.c".to_string()]),
    );
    journal.borrow_mut().clear();

    session.load_binary("/bin/x", &["--flag".to_string()]);

    assert!(session.store().get::<SourceFilePaths>().is_empty());
    assert_eq!(session.execution_state(), ExecutionState::Exited);

    let sources_cleared = position(&journal, |r| r == &Record::Set("source_file_paths")).unwrap();
    let exited = position(&journal, |r| r == &Record::Set("inferior_program")).unwrap();
    let load = position(&journal, |r| matches!(r, Record::Issue(..))).unwrap();
    let last_modified = position(&journal, |r| matches!(r, Record::LastModified(..))).unwrap();
    assert!(sources_cleared < exited);
    assert!(exited < load);
    assert!(load < last_modified);

    assert_eq!(
        issued(&journal),
        vec![vec![
            "-exec-arguments --flag".to_string(),
            "-file-exec-and-symbols /bin/x".to_string(),
            mi::BREAK_INSERT_MAIN.to_string(),
            mi::BREAK_LIST.to_string(),
        ]]
    );
    assert_eq!(
        journal.borrow()[last_modified],
        Record::LastModified(session.tag(), "/bin/x".to_string())
    );
}

#[test]
fn test_load_binary_target() {
    let config = Config {
        default_language: Language::Rust,
        auto_add_breakpoint_to_main: false,
        ..Config::default()
    };
    let (mut session, journal) = session_with(SessionBuilder::new().with_config(config));

    session.load_binary("/tmp/my app", &["a b".to_string(), "c".to_string()]);

    let binary = session.store().get::<Binary>().unwrap();
    assert_eq!(binary.path, "/tmp/my app");
    assert_eq!(binary.arguments, vec!["a b", "c"]);
    assert_eq!(binary.language, Language::Rust);
    assert_eq!(binary.last_modified, None);

    assert_eq!(
        issued(&journal),
        vec![vec![
            "-exec-arguments \"a b\" c".to_string(),
            "-file-exec-and-symbols \"/tmp/my app\"".to_string(),
            mi::BREAK_LIST.to_string(),
        ]]
    );
}

#[test]
fn test_load_binary_keep_cached_files() {
    let (mut session, _) = session();
    let tag = session.tag();
    session.apply_response(tag, Response::SourceFile(SourceFile::new("/src/a.c", vec![])));

    session.load_binary("/bin/x", &[]);

    let files = session.store().get::<CachedSourceFiles>();
    assert_eq!(files.len(), 1);
    assert!(files[0].assembly.is_empty());
}

#[test]
fn test_fetch_source_files() {
    let (mut session, journal) = session();
    session.load_binary("/bin/x", &[]);
    journal.borrow_mut().clear();

    session.fetch_source_files();
    assert!(session.store().get::<FetchingSourceFiles>());
    assert_eq!(issued(&journal), vec![vec![mi::LIST_SOURCE_FILES.to_string()]]);

    let tag = session.tag();
    assert!(session.apply_response(
        tag,
        Response::SourceFilePaths(vec!["/src/b.c".to_string(), "/src/a.c".to_string()]),
    ));
    assert!(!session.store().get::<FetchingSourceFiles>());
    assert_eq!(
        session.store().get::<SourceFilePaths>(),
        vec!["/src/a.c", "/src/b.c"]
    );
}

#[test]
fn test_reload_drops_fetch_in_progress() {
    let (mut session, _) = session();
    session.load_binary("/bin/x", &[]);
    session.fetch_source_files();
    let old_binary = session.tag();

    session.load_binary("/bin/y", &[]);
    assert!(!session.store().get::<FetchingSourceFiles>());

    assert!(!session.apply_response(
        old_binary,
        Response::SourceFilePaths(vec!["/x/main.c".to_string()]),
    ));
    assert!(session.store().get::<SourceFilePaths>().is_empty());
}
