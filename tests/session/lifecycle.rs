use crate::common::{broken_session, issued, position, session, Record, TestSession};
use dbgsync::gateway::mi;
use dbgsync::gateway::Tag;
use dbgsync::model::{ExecutionState, Frame, FramePayload, LocalVariable, RenderMode, ThreadInfo};
use dbgsync::session::event::Response;
use dbgsync::store::keys::{
    CurrentAssemblyAddress, CurrentRegisterValues, CurrentThreadId, DisassemblyForMissingFile,
    FullnameToRender, InferiorPid, LineOfSourceToFlash, Locals, MakeCurrentLineVisible,
    MemoryCache, PausedOnFrame, PreviousRegisterValues, RenderFocusMode, RootVariableTree,
    SelectedFrameNum, Stack, Threads,
};
use dbgsync::store::Store;
use indexmap::IndexMap;

fn paused_at(fullname: &str, line: &str) -> FramePayload {
    FramePayload::EMPTY
        .with_fullname(fullname)
        .with_line(line)
        .with_addr("0x0000555555555131")
        .with_func("main")
}

/// Fill everything that exists only for a paused program.
fn fill_paused_state(session: &mut TestSession) {
    session.notify_paused(paused_at("/src/main.c", "10"));
    let tag = session.tag();
    session.apply_response(tag, Response::Stack(vec![Frame::default(), Frame::default()]));
    session.apply_response(
        tag,
        Response::Threads {
            current_thread_id: Some(1),
            threads: vec![ThreadInfo {
                id: 1,
                ..Default::default()
            }],
        },
    );
    session.apply_response(
        tag,
        Response::Locals(vec![LocalVariable {
            name: "argc".to_string(),
            value: Some("1".to_string()),
            r#type: Some("int".to_string()),
        }]),
    );
    session.apply_response(
        tag,
        Response::Memory {
            addr: "0x1000".to_string(),
            contents: "90".to_string(),
        },
    );
    session.apply_response(
        tag,
        Response::Registers(IndexMap::from([("rip".to_string(), "0x1".to_string())])),
    );
    session.apply_response(tag, Response::InferiorPid(4242));
    session.store_mut().set::<SelectedFrameNum>(1);
    session.store_mut().set::<RootVariableTree>(Some("var1".to_string()));
    session
        .store_mut()
        .set::<DisassemblyForMissingFile>(vec!["nop".to_string()]);
}

fn assert_program_state_cleared(session: &TestSession) {
    let store = session.store();
    assert_eq!(store.get::<PausedOnFrame>(), Frame::EMPTY);
    assert_eq!(store.get::<LineOfSourceToFlash>(), None);
    assert_eq!(store.get::<SelectedFrameNum>(), 0);
    assert_eq!(store.get::<CurrentThreadId>(), None);
    assert!(store.get::<Stack>().is_empty());
    assert!(store.get::<Threads>().is_empty());
    assert!(store.get::<MemoryCache>().is_empty());
    assert!(store.get::<Locals>().is_empty());
}

#[test]
fn test_paused_sets_focus() {
    let (mut session, journal) = session();

    session.notify_paused(paused_at("/a/b.c", "42"));

    let store = session.store();
    assert_eq!(session.execution_state(), ExecutionState::Paused);
    assert_eq!(store.get::<LineOfSourceToFlash>(), Some(42));
    assert_eq!(store.get::<FullnameToRender>().as_deref(), Some("/a/b.c"));
    assert_eq!(store.get::<RenderFocusMode>(), RenderMode::PausedFrame);
    assert_eq!(
        store.get::<CurrentAssemblyAddress>().as_deref(),
        Some("0x0000555555555131")
    );
    assert!(store.get::<MakeCurrentLineVisible>());

    let frame = store.get::<PausedOnFrame>();
    assert_eq!(frame.line, Some(42));
    assert_eq!(frame.func.as_deref(), Some("main"));

    assert_eq!(issued(&journal), vec![mi::refresh_state_for_pause()]);
}

#[test]
fn test_paused_refresh_after_store_update() {
    let (mut session, journal) = session();
    session.notify_paused(paused_at("/a/b.c", "42"));

    let journal = journal.borrow();
    let issue_pos = journal
        .iter()
        .position(|r| matches!(r, Record::Issue(..)))
        .unwrap();
    assert_eq!(issue_pos, journal.len() - 1);
    for key in [
        "inferior_program",
        "render_paused_frame_or_user_selection",
        "fullname_to_render",
        "line_of_source_to_flash",
        "current_assembly_address",
        "paused_on_frame",
        "make_current_line_visible",
    ] {
        assert!(
            journal[..issue_pos].contains(&Record::Set(key)),
            "{key} must be set before refresh"
        );
    }
}

#[test]
fn test_paused_partial_frame() {
    let (mut session, journal) = session();

    session.notify_paused(FramePayload::EMPTY.with_line("not-a-number"));

    let store = session.store();
    assert_eq!(session.execution_state(), ExecutionState::Paused);
    assert_eq!(store.get::<LineOfSourceToFlash>(), None);
    assert_eq!(store.get::<FullnameToRender>(), None);
    assert_eq!(store.get::<CurrentAssemblyAddress>(), None);
    assert!(store.get::<PausedOnFrame>().is_empty());
    assert_eq!(issued(&journal).len(), 1);

    session.notify_paused(FramePayload::EMPTY);
    assert_eq!(session.execution_state(), ExecutionState::Paused);
    assert_eq!(issued(&journal).len(), 2);
}

#[test]
fn test_running_resets_paused_state() {
    let (mut session, journal) = session();
    fill_paused_state(&mut session);
    journal.borrow_mut().clear();

    session.notify_running();

    assert_eq!(session.execution_state(), ExecutionState::Running);
    assert_program_state_cleared(&session);
    // register snapshots and pid live until exit
    assert!(!session.store().get::<CurrentRegisterValues>().is_empty());
    assert_eq!(session.store().get::<InferiorPid>(), Some(4242));
    assert!(issued(&journal).is_empty());
}

#[test]
fn test_exited_resets_everything() {
    let (mut session, _) = session();
    fill_paused_state(&mut session);

    session.notify_exited();

    let store = session.store();
    assert_eq!(session.execution_state(), ExecutionState::Exited);
    assert_program_state_cleared(&session);
    assert!(store.get::<DisassemblyForMissingFile>().is_empty());
    assert_eq!(store.get::<RootVariableTree>(), None);
    assert!(store.get::<PreviousRegisterValues>().is_empty());
    assert!(store.get::<CurrentRegisterValues>().is_empty());
    assert_eq!(store.get::<InferiorPid>(), None);
}

#[test]
fn test_reenter_same_state() {
    let (mut session, journal) = session();

    session.notify_paused(paused_at("/a.c", "1"));
    session.notify_paused(paused_at("/b.c", "2"));
    assert_eq!(
        session.store().get::<FullnameToRender>().as_deref(),
        Some("/b.c")
    );
    assert_eq!(issued(&journal).len(), 2);

    session.notify_exited();
    session.notify_exited();
    assert_eq!(session.execution_state(), ExecutionState::Exited);
    assert_program_state_cleared(&session);
}

#[test]
fn test_transition_sequences() {
    let (mut session, _) = session();

    // deterministic pseudo-random walk over transitions
    let mut seed: u32 = 17;
    for step in 0..300 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12345);
        let expected = match (seed >> 16) % 3 {
            0 => {
                session.notify_running();
                ExecutionState::Running
            }
            1 => {
                session.notify_paused(paused_at("/src/loop.c", &step.to_string()));
                ExecutionState::Paused
            }
            _ => {
                session.notify_exited();
                ExecutionState::Exited
            }
        };

        assert_eq!(session.execution_state(), expected);
        let store = session.store();
        if expected == ExecutionState::Paused {
            assert_eq!(store.get::<LineOfSourceToFlash>(), Some(step));
            assert!(!store.get::<PausedOnFrame>().is_empty());
        } else {
            assert_program_state_cleared(&session);
        }
    }
}

#[test]
fn test_transitions_with_broken_gateway() {
    let (mut session, journal) = broken_session();

    session.notify_paused(paused_at("/a/b.c", "42"));
    assert_eq!(session.execution_state(), ExecutionState::Paused);
    assert_eq!(session.store().get::<LineOfSourceToFlash>(), Some(42));

    session.load_binary("/bin/x", &[]);
    assert_eq!(session.execution_state(), ExecutionState::Exited);
    assert!(issued(&journal).is_empty());
    assert_eq!(
        position(&journal, |r| matches!(r, Record::LastModified(..))),
        None
    );
}

#[test]
fn test_console_command_refresh() {
    let (mut session, journal) = session();

    session.execute_console_command("-exec-next");
    let mut expected = vec!["-exec-next".to_string()];
    expected.extend(mi::refresh_state_for_pause());
    assert_eq!(issued(&journal), vec![expected]);

    journal.borrow_mut().clear();
    session
        .store_mut()
        .set::<dbgsync::store::keys::RefreshStateAfterConsoleCommand>(false);
    session.execute_console_command("info frame");
    assert_eq!(issued(&journal), vec![vec!["info frame".to_string()]]);
}

#[test]
fn test_commands_tagged_with_current_state() {
    let (mut session, journal) = session();

    session.notify_paused(paused_at("/a.c", "1"));
    let first = session.tag();
    session.notify_running();
    session.notify_paused(paused_at("/a.c", "2"));
    let second = session.tag();
    assert!(second.execution > first.execution);

    let tags: Vec<Tag> = journal
        .borrow()
        .iter()
        .filter_map(|r| match r {
            Record::Issue(tag, _) => Some(*tag),
            _ => None,
        })
        .collect();
    assert_eq!(tags, vec![first, second]);
}
