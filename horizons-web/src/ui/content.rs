//! Fixed page content: support resources and community samples

/// Crisis or counselling helpline
pub struct Helpline {
    pub name: &'static str,
    pub kind: &'static str,
    pub contact: &'static str,
    pub website: &'static str,
    pub description: &'static str,
    pub available: &'static str,
}

pub struct TherapyPlatform {
    pub name: &'static str,
    pub kind: &'static str,
    pub website: &'static str,
    pub description: &'static str,
    pub pricing: &'static str,
}

pub struct SelfHelpTool {
    pub name: &'static str,
    pub kind: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

pub const HELPLINES: &[Helpline] = &[
    Helpline {
        name: "Vandrevala Foundation",
        kind: "24/7 Helpline",
        contact: "1860-266-2345",
        website: "https://www.vandrevalafoundation.com",
        description: "Free mental health support and counseling",
        available: "24/7",
    },
    Helpline {
        name: "iCall Psychosocial Helpline",
        kind: "Counseling",
        contact: "9152987821",
        website: "https://icallhelpline.org",
        description: "Professional counseling services",
        available: "Mon-Sat, 8 AM - 10 PM",
    },
    Helpline {
        name: "AASRA",
        kind: "Crisis Helpline",
        contact: "91-9820466726",
        website: "http://www.aasra.info",
        description: "24/7 crisis intervention",
        available: "24/7",
    },
];

pub const THERAPY_PLATFORMS: &[TherapyPlatform] = &[
    TherapyPlatform {
        name: "The Mind Clan",
        kind: "Online Therapy Platform",
        website: "https://themindclan.com",
        description: "Affordable online therapy with licensed professionals",
        pricing: "Starting ₹500/session",
    },
    TherapyPlatform {
        name: "YourDOST",
        kind: "Emotional Support",
        website: "https://yourdost.com",
        description: "Chat-based emotional wellness platform",
        pricing: "Free & Paid options",
    },
    TherapyPlatform {
        name: "BetterHelp India",
        kind: "Online Counseling",
        website: "https://www.betterhelp.com",
        description: "International platform with Indian therapists",
        pricing: "Starting $60/week",
    },
];

pub const SELF_HELP: &[SelfHelpTool] = &[
    SelfHelpTool {
        name: "Headspace",
        kind: "Meditation App",
        description: "Guided meditation and mindfulness",
        icon: "🧠",
    },
    SelfHelpTool {
        name: "Calm",
        kind: "Sleep & Meditation",
        description: "Sleep stories and relaxation techniques",
        icon: "🌙",
    },
    SelfHelpTool {
        name: "Journaling",
        kind: "Self-Reflection",
        description: "Use our built-in journal feature",
        icon: "📖",
    },
];

/// Sample community post
pub struct CommunityPost {
    pub author: &'static str,
    pub time_ago: &'static str,
    pub category: &'static str,
    pub content: &'static str,
    pub hearts: u32,
    pub hugs: u32,
    pub comments: u32,
}

pub const COMMUNITY_POSTS: &[CommunityPost] = &[
    CommunityPost {
        author: "Priya M.",
        time_ago: "2 hours ago",
        category: "success",
        content: "It's been 3 months since my breakup, and I can finally say I'm happy again! This community and the AI tools helped me so much. To anyone struggling: it gets better, I promise. 💪",
        hearts: 45,
        hugs: 23,
        comments: 12,
    },
    CommunityPost {
        author: "Rahul K.",
        time_ago: "5 hours ago",
        category: "advice",
        content: "How do you deal with seeing your ex on social media? I know I should unfollow but I can't bring myself to do it. Any advice?",
        hearts: 18,
        hugs: 34,
        comments: 28,
    },
    CommunityPost {
        author: "Ananya S.",
        time_ago: "8 hours ago",
        category: "support",
        content: "Today marks one month. Some days are harder than others, but I'm learning to be okay with not being okay. Thank you all for being here.",
        hearts: 67,
        hugs: 89,
        comments: 19,
    },
    CommunityPost {
        author: "Vikram P.",
        time_ago: "12 hours ago",
        category: "general",
        content: "Just wanted to share that I went out with friends for the first time in weeks. Baby steps, but it felt good to laugh again.",
        hearts: 52,
        hugs: 41,
        comments: 15,
    },
    CommunityPost {
        author: "Meera D.",
        time_ago: "1 day ago",
        category: "resources",
        content: "Found this amazing meditation app that's been helping with anxiety. DM me if you want the name. Also, the breathing exercise on this platform is a lifesaver!",
        hearts: 38,
        hugs: 22,
        comments: 31,
    },
    CommunityPost {
        author: "Arjun T.",
        time_ago: "1 day ago",
        category: "advice",
        content: "Is it normal to still miss them even when you know the relationship was toxic? I feel so conflicted.",
        hearts: 42,
        hugs: 58,
        comments: 24,
    },
];

/// (name, posts, hearts)
pub const TOP_CONTRIBUTORS: &[(&str, u32, u32)] = &[
    ("Kavya R.", 47, 892),
    ("Aditya M.", 39, 756),
    ("Shreya K.", 35, 634),
    ("Rohan S.", 28, 521),
    ("Nisha P.", 24, 489),
];
