use clap::ValueEnum;
use serde::Serialize;

/// Review site selected with `--source`. The serialized form is the
/// `source` label written to the output file.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum Source {
    G2,
    Capterra,
    TrustRadius,
}

/// Markup shape of one review site: where a review block sits on a
/// listing page and where its fields sit inside the block.
pub struct SiteSpec {
    pub block: &'static str,
    pub title: &'static str,
    pub body: &'static str,
    pub date: DateField,
}

/// How a site encodes the review date inside a block.
pub enum DateField {
    /// ISO date in a `datetime` attribute, e.g. `<time datetime="2024-06-05T09:30:00Z">`.
    Attr { selector: &'static str },
    /// Written-out date in element text, e.g. "June 5, 2024".
    Text {
        selector: &'static str,
        format: &'static str,
    },
}

static G2_SPEC: SiteSpec = SiteSpec {
    block: ".paper.paper--white.paper--box",
    title: "h3",
    body: ".formatted-text",
    date: DateField::Attr { selector: "time" },
};

static CAPTERRA_SPEC: SiteSpec = SiteSpec {
    block: ".review",
    title: ".review-title",
    body: ".review-comment",
    date: DateField::Text {
        selector: "time",
        format: "%B %d, %Y",
    },
};

static TRUSTRADIUS_SPEC: SiteSpec = SiteSpec {
    block: ".review-content",
    title: "h3",
    body: ".review-body",
    date: DateField::Attr { selector: "time" },
};

impl Source {
    pub fn spec(&self) -> &'static SiteSpec {
        match self {
            Source::G2 => &G2_SPEC,
            Source::Capterra => &CAPTERRA_SPEC,
            Source::TrustRadius => &TRUSTRADIUS_SPEC,
        }
    }

    pub fn base_url(&self) -> &'static str {
        match self {
            Source::G2 => "https://www.g2.com",
            Source::Capterra => "https://www.capterra.com",
            Source::TrustRadius => "https://www.trustradius.com",
        }
    }

    /// Listing-page URL for one page of a company's reviews.
    pub fn page_url(&self, base: &str, company: &str, page: u32) -> String {
        let slug = slug(company);
        match self {
            Source::G2 => format!("{base}/products/{slug}/reviews?page={page}"),
            Source::Capterra => format!("{base}/p/{slug}/reviews/?page={page}"),
            Source::TrustRadius => format!("{base}/products/{slug}/reviews?page={page}"),
        }
    }
}

// Company name as it appears in listing URLs
fn slug(company: &str) -> String {
    company.to_lowercase().replace(' ', "-")
}
