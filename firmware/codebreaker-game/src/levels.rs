//! Level content
//!
//! Each level is plain data: what to show, how to judge the answer and which
//! code character a correct answer earns.

use alloc::string::String;

/// How a submitted answer is compared with the expected text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchRule {
    /// Whole answer equal, ignoring case
    IgnoreCase(&'static str),
    /// Whole answer equal, byte for byte
    Exact(&'static str),
    /// Expected text appears anywhere in the answer, ignoring case
    ContainsIgnoreCase(&'static str),
}

impl MatchRule {
    pub fn matches(&self, answer: &str) -> bool {
        match *self {
            MatchRule::IgnoreCase(expected) => lower(answer) == lower(expected),
            MatchRule::Exact(expected) => answer == expected,
            MatchRule::ContainsIgnoreCase(expected) => lower(answer).contains(&lower(expected)),
        }
    }
}

fn lower(text: &str) -> String {
    text.to_lowercase()
}

/// One puzzle
#[derive(Clone, Copy, Debug)]
pub struct LevelChallenge {
    /// Heading on the briefing screen
    pub title: &'static str,
    /// Challenge text, one entry per display line
    pub prompt: &'static [&'static str],
    /// Shown above the text being typed
    pub input_prompt: &'static str,
    pub rule: MatchRule,
    /// Appended to the secret code when the level is passed
    pub code_char: char,
}

impl LevelChallenge {
    /// Judge an answer; pure, no side effects on the game
    pub fn evaluate(&self, answer: &str) -> bool {
        self.rule.matches(answer)
    }
}

/// The five CodeBreaker levels, in play order
pub const LEVELS: [LevelChallenge; 5] = [
    LevelChallenge {
        title: "Level 1: Binary Decoder",
        prompt: &["Decode:", "01001000 01100101 01101100", "01101100 01101111"],
        input_prompt: "Your answer:",
        rule: MatchRule::IgnoreCase("Hello"),
        code_char: 'A',
    },
    LevelChallenge {
        title: "Level 2: Regex Matcher",
        prompt: &["Pattern: ^[a-z0-9_-]{3,16}$", "Find a matching string"],
        input_prompt: "Your answer:",
        rule: MatchRule::Exact("user_123"),
        code_char: 'B',
    },
    LevelChallenge {
        title: "Level 3: Logic Gate",
        prompt: &["A AND (B OR C)", "Input: 1 1 0", "Output: ?"],
        input_prompt: "Your answer (0/1):",
        rule: MatchRule::Exact("101"),
        code_char: 'C',
    },
    LevelChallenge {
        title: "Level 4: Optimization",
        prompt: &[
            "Optimize:",
            "def fib(n):",
            "    if n <= 1:",
            "        return n",
            "    return fib(n-1) + fib(n-2)",
        ],
        input_prompt: "Optimization technique:",
        rule: MatchRule::ContainsIgnoreCase("dynamic programming"),
        code_char: 'D',
    },
    LevelChallenge {
        title: "Level 5: Cryptography",
        prompt: &["Decrypt:", "Uif tfdsfu jt jo uif mbtu mfwfm"],
        input_prompt: "Decrypted message:",
        rule: MatchRule::IgnoreCase("The secret is in the last level"),
        code_char: 'E',
    },
];
