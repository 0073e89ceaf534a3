/// What [`MessageSink`](crate::MessageSink) puts after each message.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum LineMode {
    /// One `\n` after every message.
    #[default]
    Newline,
    /// Nothing; the message bytes are written as they are.
    Raw,
}

impl LineMode {
    /// The bytes that end a message in this mode.
    ///
    /// ```
    /// use finelog_sink::LineMode;
    ///
    /// assert_eq!(LineMode::Newline.terminator(), "\n");
    /// assert_eq!(LineMode::Raw.terminator(), "");
    /// ```
    #[must_use]
    pub const fn terminator(self) -> &'static str {
        match self {
            Self::Newline => "\n",
            Self::Raw => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_end_with_a_newline_by_default() {
        assert_eq!(LineMode::default(), LineMode::Newline);
        assert_eq!(LineMode::default().terminator(), "\n");
    }
}
