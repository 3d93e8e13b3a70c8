// UI Constants
pub const APP_TITLE: &str = "✨ Nexa AI";
pub const USER_AVATAR: &str = "U";
pub const ASSISTANT_AVATAR: &str = "🤖";
pub const INPUT_PLACEHOLDER: &str = "Ask anything...";
pub const INPUT_PLACEHOLDER_BUSY: &str = "Please wait for the response...";
pub const SEND_LABEL: &str = "Send";
pub const SEND_LABEL_BUSY: &str = "Wait";
pub const THINKING_TEXT: &str = "AI is thinking...";
pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied! ✅";

/// Share of the message area a bubble may occupy, in percent.
pub const BUBBLE_WIDTH_PERCENT: u16 = 75;
pub const TAB_WIDTH: usize = 4;

// API Constants
pub const DEFAULT_ENDPOINT: &str = "https://ai-e4er.onrender.com/chat";
pub const FALLBACK_REPLY: &str = "No response from AI.";
pub const SERVER_ERROR_TEXT: &str = "⚠️ Server Error. Try again later.";

// Timing Constants
pub const DEFAULT_REVEAL_TICK_MS: u64 = 10;
pub const DEFAULT_COPY_FEEDBACK_MS: u64 = 2000;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const UI_TICK_MS: u64 = 100;

pub const CODE_FENCE: &str = "```";
