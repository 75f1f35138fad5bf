//! Deterministic local reply generation: the last-resort branch of the
//! response pipeline. Nothing here can fail.

/// Seed greeting for the video chat surface.
pub const VIDEO_GREETING: &str =
    "Hello! I'm your AI learning assistant. How can I help you with this video?";

/// Seed greeting for the tutor surface.
pub const TUTOR_GREETING: &str = "Hello! I'm your AI Tutor. I can help you with your learning \
     journey, answer questions about various topics, and provide personalized learning \
     recommendations. How can I assist you today?";

/// Apology appended by the stricter (tutor) surface when the remote call fails.
pub const CONNECTION_APOLOGY: &str =
    "Sorry, I'm having trouble connecting to the tutoring service right now. Please try again later.";

/// Substituted when the endpoint answers 2xx but the reply field is empty.
pub const COULD_NOT_PROCESS: &str =
    "Sorry, I couldn't process that request. Please try asking again.";

/// Keyword-matched reply variants for the simulated tutor.
const KEYWORD_REPLIES: &[(&str, &[&str])] = &[
    (
        "learn",
        &[
            "To learn effectively, I recommend breaking the topic into smaller chunks and \
             practicing regularly. What specific subject are you interested in?",
            "Learning is a journey! A combination of video tutorials, hands-on practice, and \
             reading materials usually works best. Would you like recommendations for your topic?",
        ],
    ),
    (
        "recommend",
        &[
            "Based on your interests, I'd recommend starting with fundamental concepts before \
             moving to advanced topics. Would you like a structured learning path?",
            "I'd be happy to make some recommendations! To personalize them better, could you \
             tell me about your current knowledge level and goals?",
        ],
    ),
    (
        "roadmap",
        &[
            "A good learning roadmap should include theory, practice, and projects. I can help \
             you create one tailored to your goals. What are you looking to achieve?",
            "Creating a personalized roadmap is a great way to stay focused. Let's start by \
             identifying your current skills and your target expertise level.",
        ],
    ),
    (
        "difficult",
        &[
            "Many learners find that concept challenging! Breaking it down into smaller parts \
             and practicing with examples often helps. Would you like me to explain it differently?",
            "When facing difficult concepts, try approaching them from different angles. Visual \
             learners might benefit from diagrams, while others prefer step-by-step explanations.",
        ],
    ),
    (
        "project",
        &[
            "Working on projects is an excellent way to solidify your learning! For beginners, \
             I suggest starting with guided projects before creating something from scratch.",
            "Projects are where learning comes alive! Consider choosing something that interests \
             you personally - you'll be more motivated to overcome obstacles.",
        ],
    ),
];

/// Replies used when no keyword matches.
const DEFAULT_REPLIES: &[&str] = &[
    "That's an interesting question! To provide the most helpful response, could you share a \
     bit more about your learning goals?",
    "I'm here to help with your learning journey. Could you elaborate on your question so I \
     can give you more specific guidance?",
    "As your AI Tutor, I'd be happy to assist with that. To provide tailored advice, it would \
     help to know your current knowledge level in this area.",
    "Great question! Learning is highly personal, so to give you the best answer, I'd like to \
     know what you're hoping to achieve.",
    "I can definitely help with that. To make my response more relevant to your needs, could \
     you tell me what you've already tried or learned on this topic?",
];

/// FNV-1a over the question text. Variant selection must be stable so the
/// fallback branch stays deterministic and testable.
fn stable_hash(text: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in text.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

fn pick<'a>(variants: &[&'a str], question: &str) -> &'a str {
    variants[(stable_hash(question) % variants.len() as u64) as usize]
}

/// Simulated tutor reply: first matching keyword wins, else a default.
/// Same question, same reply.
pub fn tutor_reply(question: &str) -> &'static str {
    let lowered = question.to_lowercase();
    for (keyword, variants) in KEYWORD_REPLIES {
        if lowered.contains(keyword) {
            return pick(variants, question);
        }
    }
    pick(DEFAULT_REPLIES, question)
}

/// Fallback for the video chat surface when the remote call fails. Echoes
/// the question and, when known, ties it to the playback position.
pub fn video_reply(message: &str, position_label: Option<&str>) -> String {
    match position_label {
        Some(label) => format!(
            "I noticed you asked about this at {label}. I couldn't reach the tutoring service \
             just now, but '{message}' appears related to the concepts at this timestamp. Try \
             replaying that section, and ask me again in a moment."
        ),
        None => format!(
            "I couldn't reach the tutoring service just now, but I'd still like to help with \
             '{message}'. Try asking again in a moment, or rephrase your question."
        ),
    }
}
