#[derive(Debug, Clone)]
pub enum Action {
    SubmitMessage { raw: String },
    CopyShareLink,
    /// The ui put the share link of the request with this id on the clipboard
    LinkCopied { id: u64 },
    DismissNotice,
    Exit,
}
