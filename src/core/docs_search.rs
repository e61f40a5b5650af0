//! Relevance search over the documentation index
//!
//! A pure function of (query, filters, fixed index). Scoring is a weighted
//! substring match of each query term against title, description, keywords
//! and category, with a small boost for entry-level documents.

const DOCS_BASE_URL: &str = "https://github.com/lamassu-labs/treasury-command-center/blob/main/docs/";

/// Maximum number of results returned by [`search`]
pub const MAX_RESULTS: usize = 10;

/// Queries offered before the user has typed anything
pub const SUGGESTED_QUERIES: &[&str] = &[
    "business value",
    "quick start",
    "development setup",
    "architecture",
    "deployment",
    "community",
];

const TITLE_WEIGHT: u32 = 10;
const DESCRIPTION_WEIGHT: u32 = 5;
const KEYWORD_WEIGHT: u32 = 7;
const CATEGORY_WEIGHT: u32 = 3;
const AWARENESS_BONUS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocCategory {
    Business,
    Technical,
    Community,
    Implementation,
}

impl DocCategory {
    pub const ALL: [DocCategory; 4] = [
        DocCategory::Business,
        DocCategory::Technical,
        DocCategory::Community,
        DocCategory::Implementation,
    ];

    /// Lowercase tag, also what query terms are matched against
    pub fn as_str(&self) -> &'static str {
        match self {
            DocCategory::Business => "business",
            DocCategory::Technical => "technical",
            DocCategory::Community => "community",
            DocCategory::Implementation => "implementation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DocCategory::Business => "Business",
            DocCategory::Technical => "Technical",
            DocCategory::Community => "Community",
            DocCategory::Implementation => "Implementation",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DocCategory::Business => "💼",
            DocCategory::Technical => "🔧",
            DocCategory::Community => "🤝",
            DocCategory::Implementation => "👩‍💻",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == tag)
    }
}

/// Progressive disclosure layer, 1 (awareness) to 4 (mastery)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocTier(pub u8);

impl DocTier {
    pub const ALL: [DocTier; 4] = [DocTier(1), DocTier(2), DocTier(3), DocTier(4)];

    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "Awareness",
            2 => "Interest",
            3 => "Implementation",
            4 => "Mastery",
            _ => "Other",
        }
    }

    /// Badge background color
    pub fn color(&self) -> &'static str {
        match self.0 {
            1 => "#059669",
            2 => "#d97706",
            3 => "#dc2626",
            4 => "#7C3AED",
            _ => "#6B7280",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocEntry {
    pub title: &'static str,
    pub description: &'static str,
    pub path: &'static str,
    pub category: DocCategory,
    pub tier: DocTier,
    pub reading_time: &'static str,
    pub keywords: &'static [&'static str],
}

impl DocEntry {
    pub fn url(&self) -> String {
        format!("{}{}", DOCS_BASE_URL, self.path)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub entry: &'static DocEntry,
    pub score: u32,
}

/// Optional post-filters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub category: Option<DocCategory>,
    pub tier: Option<DocTier>,
}

impl SearchFilters {
    fn accepts(&self, entry: &DocEntry) -> bool {
        self.category.is_none_or(|c| c == entry.category)
            && self.tier.is_none_or(|t| t == entry.tier)
    }
}

/// Rank the index against `query`.
///
/// Queries shorter than two characters return nothing, and so do
/// whitespace-only queries. Results are sorted by descending score with
/// ties kept in index order.
pub fn search(query: &str, filters: SearchFilters) -> Vec<SearchHit> {
    if query.trim().is_empty() || query.chars().count() < 2 {
        return Vec::new();
    }

    let terms = query_terms(query);

    let mut hits: Vec<SearchHit> = DOCUMENTATION_INDEX
        .iter()
        .filter(|entry| filters.accepts(entry))
        .map(|entry| SearchHit {
            entry,
            score: score(entry, &terms),
        })
        .filter(|hit| hit.score > 0)
        .collect();

    // sort_by is stable
    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(MAX_RESULTS);
    hits
}

fn query_terms(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|term| term.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

fn score(entry: &DocEntry, terms: &[String]) -> u32 {
    let title = entry.title.to_lowercase();
    let description = entry.description.to_lowercase();
    let category = entry.category.as_str();

    let mut score = 0;
    for term in terms {
        let term = term.as_str();
        if title.contains(term) {
            score += TITLE_WEIGHT;
        }
        if description.contains(term) {
            score += DESCRIPTION_WEIGHT;
        }
        score += entry
            .keywords
            .iter()
            .filter(|kw| kw.contains(term) || term.contains(**kw))
            .count() as u32
            * KEYWORD_WEIGHT;
        if category.contains(term) {
            score += CATEGORY_WEIGHT;
        }
    }

    if entry.tier == DocTier(1) {
        score += AWARENESS_BONUS;
    }
    score
}

pub static DOCUMENTATION_INDEX: &[DocEntry] = &[
    // Layer 1
    DocEntry {
        title: "Business Value Overview",
        description: "ROI analysis, competitive advantages, and strategic positioning for treasury management",
        path: "business/BUSINESS_VALUE_OVERVIEW.md",
        category: DocCategory::Business,
        tier: DocTier(1),
        reading_time: "3 min",
        keywords: &[
            "business", "value", "roi", "competitive", "advantages", "treasury", "management",
            "strategic", "positioning", "enterprise", "cost", "savings", "efficiency",
        ],
    },
    DocEntry {
        title: "Technical Evaluation",
        description: "Architecture overview, technology stack, and integration requirements",
        path: "technical/TECHNICAL_EVALUATION.md",
        category: DocCategory::Technical,
        tier: DocTier(1),
        reading_time: "5 min",
        keywords: &[
            "technical", "architecture", "technology", "stack", "integration", "requirements",
            "evaluation", "system", "design", "infrastructure", "scalability", "security",
        ],
    },
    DocEntry {
        title: "Community Contribution Overview",
        description: "Discover contribution opportunities and community benefits",
        path: "community/CONTRIBUTION_OVERVIEW.md",
        category: DocCategory::Community,
        tier: DocTier(1),
        reading_time: "5 min",
        keywords: &[
            "community", "contribution", "open", "source", "collaboration", "benefits",
            "opportunities", "volunteer", "participate", "github", "development",
        ],
    },
    // Layer 2
    DocEntry {
        title: "Detailed Business Case",
        description: "Complete financial impact analysis and implementation strategy",
        path: "business/DETAILED_BUSINESS_CASE.md",
        category: DocCategory::Business,
        tier: DocTier(2),
        reading_time: "8 min",
        keywords: &[
            "detailed", "business", "case", "financial", "impact", "analysis", "implementation",
            "strategy", "cost", "benefit", "investment", "planning",
        ],
    },
    DocEntry {
        title: "Technical Deep Dive",
        description: "Comprehensive system design and deployment strategies",
        path: "technical/TECHNICAL_DEEP_DIVE.md",
        category: DocCategory::Technical,
        tier: DocTier(2),
        reading_time: "10 min",
        keywords: &[
            "technical", "deep", "dive", "system", "design", "deployment", "strategies",
            "architecture", "detailed", "comprehensive", "engineering",
        ],
    },
    DocEntry {
        title: "Advanced Contribution Guide",
        description: "Comprehensive governance structure and leadership pathways",
        path: "community/ADVANCED_CONTRIBUTION.md",
        category: DocCategory::Community,
        tier: DocTier(2),
        reading_time: "12 min",
        keywords: &[
            "advanced", "contribution", "governance", "structure", "leadership", "pathways",
            "maintainer", "review", "process", "guidelines",
        ],
    },
    DocEntry {
        title: "Market Opportunity Analysis",
        description: "Market positioning and competitive landscape review",
        path: "business/MARKET_OPPORTUNITY.md",
        category: DocCategory::Business,
        tier: DocTier(2),
        reading_time: "7 min",
        keywords: &[
            "market", "opportunity", "analysis", "positioning", "competitive", "landscape",
            "review", "industry", "trends", "web3", "defi",
        ],
    },
    // Layer 3
    DocEntry {
        title: "Quick Start Guide",
        description: "15-minute local setup with prerequisites and commands",
        path: "getting-started/QUICK_START.md",
        category: DocCategory::Implementation,
        tier: DocTier(3),
        reading_time: "15 min",
        keywords: &[
            "quick", "start", "guide", "setup", "prerequisites", "commands", "installation",
            "local", "development", "getting", "started",
        ],
    },
    DocEntry {
        title: "Development Environment Setup",
        description: "Complete development setup with testing and debugging tools",
        path: "developers/DEVELOPMENT_SETUP.md",
        category: DocCategory::Implementation,
        tier: DocTier(3),
        reading_time: "30 min",
        keywords: &[
            "development", "environment", "setup", "testing", "debugging", "tools", "local",
            "configuration", "developer", "workflow",
        ],
    },
    DocEntry {
        title: "Production Deployment",
        description: "Enterprise deployment with monitoring and security",
        path: "deployment/PRODUCTION_DEPLOYMENT.md",
        category: DocCategory::Implementation,
        tier: DocTier(3),
        reading_time: "45 min",
        keywords: &[
            "production", "deployment", "enterprise", "monitoring", "security", "scaling",
            "infrastructure", "operational", "maintenance",
        ],
    },
    DocEntry {
        title: "Architecture Overview",
        description: "System architecture and component relationships",
        path: "technical/ARCHITECTURE_OVERVIEW.md",
        category: DocCategory::Technical,
        tier: DocTier(3),
        reading_time: "20 min",
        keywords: &[
            "architecture", "overview", "system", "component", "relationships", "design",
            "patterns", "structure", "microservices", "api",
        ],
    },
    DocEntry {
        title: "Multi-Chain Setup",
        description: "Configure multi-blockchain treasury management",
        path: "integration/blockchain/MULTI_CHAIN_SETUP.md",
        category: DocCategory::Implementation,
        tier: DocTier(3),
        reading_time: "25 min",
        keywords: &[
            "multi", "chain", "setup", "blockchain", "treasury", "management", "configuration",
            "ethereum", "polygon", "arbitrum", "integration",
        ],
    },
    DocEntry {
        title: "First Contribution",
        description: "30-minute onboarding with multiple contribution pathways",
        path: "community/FIRST_CONTRIBUTION.md",
        category: DocCategory::Community,
        tier: DocTier(3),
        reading_time: "30 min",
        keywords: &[
            "first", "contribution", "onboarding", "pathways", "beginner", "guide", "pull",
            "request", "issue", "documentation", "code",
        ],
    },
    // Layer 4
    DocEntry {
        title: "Treasury Command Center PRD",
        description: "Complete product requirements and feature specifications",
        path: "product/TREASURY_COMMAND_CENTER_PRD.md",
        category: DocCategory::Business,
        tier: DocTier(4),
        reading_time: "20 min",
        keywords: &[
            "prd", "product", "requirements", "feature", "specifications", "roadmap", "planning",
            "vision", "strategy", "goals",
        ],
    },
];
