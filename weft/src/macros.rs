/// Creates a single chat [`Message`](crate::Message) from a role shorthand.
///
/// ```rust
/// use weft::{Role, weft_msg};
///
/// let message = weft_msg!(assistant => "Done.");
/// assert_eq!(message.role(), Role::Assistant);
/// assert_eq!(message.content(), "Done.");
/// ```
#[macro_export]
macro_rules! weft_msg {
    (system => $content:expr $(,)?) => {
        $crate::Message::system($content)
    };
    (user => $content:expr $(,)?) => {
        $crate::Message::user($content)
    };
    (assistant => $content:expr $(,)?) => {
        $crate::Message::assistant($content)
    };
    ($role:ident => $content:expr $(,)?) => {
        compile_error!("unsupported role: use system, user, or assistant");
    };
}

/// Creates a `Vec<Message>` from role/content pairs.
///
/// ```rust
/// use weft::{Role, weft_messages};
///
/// let messages = weft_messages![
///     system => "You are concise.",
///     user => "Summarize this repository.",
/// ];
///
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[0].role(), Role::System);
/// assert_eq!(messages[1].role(), Role::User);
/// ```
#[macro_export]
macro_rules! weft_messages {
    () => {
        Vec::<$crate::Message>::new()
    };
    ($($role:ident => $content:expr),+ $(,)?) => {
        vec![$($crate::weft_msg!($role => $content)),+]
    };
}

/// Creates a [`Prompt`](crate::Prompt) from role/content pairs.
///
/// ```rust
/// use weft::weft_prompt;
///
/// let prompt = weft_prompt![
///     system => "You are concise.",
///     user => "Summarize this repository.",
/// ];
///
/// assert_eq!(prompt.last_user_text(), Some("Summarize this repository."));
/// ```
#[macro_export]
macro_rules! weft_prompt {
    ($($role:ident => $content:expr),+ $(,)?) => {
        $crate::Prompt::new($crate::weft_messages![$($role => $content),+])
    };
}
