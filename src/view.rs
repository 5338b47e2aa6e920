//! What the source view renders and user-initiated navigation.
//! Nothing here touches execution state: a user may browse files while the inferior is
//! running, paused or exited.

use crate::model::{parse_line, RenderMode};
use crate::muted_error;
use crate::store::keys::{
    FullnameToRender, LineOfSourceToFlash, MakeCurrentLineVisible, ModalBody, ModalHeader,
    RenderFocusMode, ShowModal,
};
use crate::store::Store;

/// Focus the view on a file the user opened.
pub fn set_user_focus(store: &mut impl Store, fullname: impl Into<String>, line: Option<&str>) {
    store.set::<RenderFocusMode>(RenderMode::UserSelection);
    store.set::<FullnameToRender>(Some(fullname.into()));
    set_flash_line(store, line);
}

/// Set the line to flash, malformed or absent line clears it.
/// Also marks the focus as fresh, so a view scrolls it into visibility.
pub fn set_flash_line(store: &mut impl Store, line: Option<&str>) {
    let line = line.and_then(|line| muted_error!(parse_line(line)));
    store.set::<LineOfSourceToFlash>(line);
    make_current_line_visible(store);
}

pub fn make_current_line_visible(store: &mut impl Store) {
    store.set::<MakeCurrentLineVisible>(true);
}

/// Called by a view after it scrolled to the focused line.
pub fn current_line_shown(store: &mut impl Store) {
    store.set::<MakeCurrentLineVisible>(false);
}

pub fn toggle_modal_visibility(store: &mut impl Store) {
    store.update::<ShowModal, _>(|show| *show = !*show);
}

pub fn show_modal(store: &mut impl Store, header: impl Into<String>, body: impl Into<String>) {
    store.set::<ModalHeader>(Some(header.into()));
    store.set::<ModalBody>(Some(body.into()));
    store.set::<ShowModal>(true);
}
