//! Interactive widgets drawn on a [`Surface`](crate::Surface).

mod textbox;

pub use textbox::{ACCEPTED_EVENT, EditMode, Outcome, TextBox, TextBoxOptions};
