mod prompt;

pub use prompt::{
    Category, CategoryFilter, NewPrompt, Prompt, PromptChanges, PromptFilter, PromptId, TagFilter,
};
