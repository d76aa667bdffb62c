pub mod layout;
pub mod script_document;
pub mod sentence_script;
pub mod word_script;
