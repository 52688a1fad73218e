//! Static copy for the welcome and about pages.

pub const APP_NAME: &str = "ArXiv Research Hub";

pub const TAGLINE: &str = "AI-Powered Research Discovery";

pub const HEADLINE: &str = "Discover Research Papers with AI";

pub const INTRO: &str = "Transform your research workflow with our intelligent search engine. \
Find relevant papers instantly using natural language queries and advanced AI algorithms.";

pub const CALL_TO_ACTION: &str = "Ready to Transform Your Research?";

pub const MISSION: &str = "To democratize access to scientific knowledge by providing researchers \
with intelligent, fast, and intuitive tools for discovering relevant research papers. We believe \
that breakthrough discoveries happen when researchers can easily find and build upon existing work.";

pub const CONTACT: &str =
    "Have questions, suggestions, or want to contribute? We'd love to hear from you!";

/// A titled blurb
#[derive(Debug, Clone, Copy)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

/// A headline number
#[derive(Debug, Clone, Copy)]
pub struct Highlight {
    pub value: &'static str,
    pub label: &'static str,
}

pub const WELCOME_FEATURES: [Feature; 4] = [
    Feature {
        title: "AI-Powered Search",
        description: "Advanced natural language processing understands your research queries and finds the most relevant papers",
    },
    Feature {
        title: "Semantic Search",
        description: "FAISS-powered vector search delivers precise results from our comprehensive research database",
    },
    Feature {
        title: "Lightning Fast",
        description: "Get instant results with our optimized search algorithms and modern infrastructure",
    },
    Feature {
        title: "Comprehensive Database",
        description: "Access thousands of curated research papers from ArXiv across multiple scientific domains",
    },
];

pub const WELCOME_HIGHLIGHTS: [Highlight; 3] = [
    Highlight {
        value: "4,000+",
        label: "Research Papers",
    },
    Highlight {
        value: "1,000+",
        label: "Authors",
    },
    Highlight {
        value: "50+",
        label: "Categories",
    },
];

pub const ABOUT_FEATURES: [Feature; 4] = [
    Feature {
        title: "AI-Powered Intelligence",
        description: "Advanced natural language processing and machine learning algorithms to understand research queries",
    },
    Feature {
        title: "Comprehensive Database",
        description: "Access to thousands of research papers from ArXiv across multiple scientific domains",
    },
    Feature {
        title: "Lightning Fast Search",
        description: "FAISS-powered vector search delivers results in milliseconds with high accuracy",
    },
    Feature {
        title: "Researcher Focused",
        description: "Built by researchers, for researchers, with features that matter to the scientific community",
    },
];

/// Client crates first, then the search service behind it
pub const TECHNOLOGIES: [Feature; 6] = [
    Feature {
        title: "ratatui",
        description: "Interactive terminal interface",
    },
    Feature {
        title: "tokio",
        description: "Async runtime for backend calls",
    },
    Feature {
        title: "reqwest",
        description: "HTTP client for the search API",
    },
    Feature {
        title: "FastAPI",
        description: "High-performance Python backend",
    },
    Feature {
        title: "FAISS",
        description: "Vector similarity search",
    },
    Feature {
        title: "Transformers",
        description: "AI language models",
    },
];

pub const ABOUT_HIGHLIGHTS: [Highlight; 3] = [
    Highlight {
        value: "4,000+",
        label: "Research Papers Indexed",
    },
    Highlight {
        value: "50+",
        label: "Scientific Categories",
    },
    Highlight {
        value: "1,000+",
        label: "Unique Authors",
    },
];
