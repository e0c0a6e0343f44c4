//! The five planets that open something when clicked.
//!
//! Compiled in: each entry carries exactly one payload, a video or a message.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Content {
    /// `key` names the clip in the media manifest; `src` is the fallback path.
    Video { key: &'static str, src: &'static str },
    Message { text: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContentItem {
    pub label: &'static str,
    pub content: Content,
}

pub const ITEM_COUNT: usize = 5;

/// Sphere colors, by item index.
pub const PLANET_COLORS: [u32; ITEM_COUNT] = [0xff6666, 0x66ffcc, 0x66ccff, 0x8866ff, 0xffcc66];

pub const ITEMS: [ContentItem; ITEM_COUNT] = [
    ContentItem {
        label: "Kika",
        content: Content::Video { key: "kika", src: "videos/planet1.mp4" },
    },
    ContentItem {
        label: "Thandeka",
        content: Content::Message {
            text: "Dear Kika,\nA person energy and aura never lies. I could tell from our first meeting (my agent interview) that you had a pure and loving, altruistic aura, and it\u{2019}s been proven true in every interaction since then. Wishing you a happy birthday and a blessed year.",
        },
    },
    ContentItem {
        label: "Simon",
        content: Content::Message {
            text: "Happy Birthday Kika! May only happiness and health come your way. Thank you for being the best team lead anyone could wish for! Thank you for teaching us how to be patient and hardworking. Lots of adventures and warm teas on your next circle around the sun.",
        },
    },
    ContentItem {
        label: "Nadir",
        content: Content::Message {
            text: "Happy birthday Kika!! You\u{2019}re the sun in our little solar system, always giving us energy, good vibes, and keeping us from drifting off into the abyss. We\u{2019}d be lost without you! Wishing you an amazing day filled with all the best things, a warm cup of tea and hopefully a little well-deserved time off. Free bogo",
        },
    },
    ContentItem {
        label: "Mohammed",
        content: Content::Message {
            text: "Happy Birthday!! Today I wish you goodness, kindness and love. You don't deserve less than these. Looking back and remembering the day I started working here and the day I moved to ops. Everything you taught me and everything we've been through in such a short period. No amount of gratitude can be enough. You are a wonderful person. We love you KIKA!",
        },
    },
];
