//! Usage templates attached to format errors.

use std::fmt::{Display, Formatter};

/// Three-part usage description: what the command does, its parameter
/// grammar, and one concrete example.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandUsage {
    pub command_word: &'static str,
    pub function: &'static str,
    pub parameters: &'static str,
    pub example: &'static str,
}

impl Display for CommandUsage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Function: {}\nParameters: {}\nExample: {}",
            self.function, self.parameters, self.example
        )
    }
}

pub const ADD_USAGE: CommandUsage = CommandUsage {
    command_word: "add",
    function: "Adds a person to the directory, or adds tags to an existing person with the same name.",
    parameters: "add n/NAME [p/PHONE] [e/EMAIL] [t/TAG]...",
    example: "add n/John Doe p/98765432 e/johnd@example.com t/friends",
};

pub const DELETE_USAGE: CommandUsage = CommandUsage {
    command_word: "delete",
    function: "Deletes a person, some of their tags, or one of their bookings.",
    parameters: "delete n/NAME ([t/TAG]... | b/BOOKING_ID)",
    example: "delete n/Alex Yeoh t/friends",
};

pub const BOOK_USAGE: CommandUsage = CommandUsage {
    command_word: "book",
    function: "Books an appointment with a client for a person.",
    parameters: "book d/DATETIME (YYYY-MM-DD HH:MM) c/CLIENT_NAME n/PERSON_NAME [desc/DESCRIPTION]",
    example: "book d/2025-09-18 14:00 c/Mr Lim n/Alice Tan desc/first consultation",
};

pub const FIND_USAGE: CommandUsage = CommandUsage {
    command_word: "find",
    function: "Finds all persons matching every given field (any keyword within a field, \
               case-insensitive). A field with no keyword matches everyone.",
    parameters: "find [n/NAME] [t/TAG] [d/DATE]",
    example: "find n/Alex t/friends",
};

pub const CLEAR_USAGE: CommandUsage = CommandUsage {
    command_word: "clear",
    function: "Clears every person from the directory. Requires f/ to confirm.",
    parameters: "clear [f/]",
    example: "clear f/",
};

pub const EDIT_USAGE: CommandUsage = CommandUsage {
    command_word: "edit",
    function: "Edits the person with the given name. Unspecified fields keep their values; \
               t/ replaces all tags.",
    parameters: "edit n/OLD_NAME [n/NEW_NAME] [p/PHONE] [e/EMAIL] [t/TAG]...",
    example: "edit n/John Doe p/91234567 e/johndoe@example.com",
};

pub const LIST_USAGE: CommandUsage = CommandUsage {
    command_word: "list",
    function: "Shows every person in the directory.",
    parameters: "list",
    example: "list",
};

/// Every command usage, in help order.
pub const ALL_USAGES: &[CommandUsage] = &[
    ADD_USAGE,
    EDIT_USAGE,
    DELETE_USAGE,
    BOOK_USAGE,
    FIND_USAGE,
    LIST_USAGE,
    CLEAR_USAGE,
];
