mod chat_completions;
pub mod groq;
pub mod lmstudio;

pub use groq::GroqProvider;
pub use lmstudio::LmStudioProvider;
