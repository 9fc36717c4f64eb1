//! Content of the previewed one-page site.

use crate::core::error::TrackerError;
use crate::core::tracker::ScrollSection;

/// One navigable block of copy.
#[derive(Debug)]
pub struct SectionCopy {
    pub id: &'static str,
    pub label: &'static str,
    /// Fraction of the section that must be on screen to highlight it.
    pub threshold: f64,
    /// Minimum height in rows; taller copy grows the section.
    pub min_rows: u16,
    pub heading: &'static str,
    pub body: &'static [&'static str],
}

/// Backdrop images cycled while a container scrolls through the viewport.
#[derive(Debug)]
pub struct Backdrop {
    pub container: &'static str,
    pub frames: &'static [&'static str],
}

#[derive(Debug)]
pub struct Page {
    pub title: &'static str,
    pub sections: &'static [SectionCopy],
    pub backdrop: Backdrop,
    /// Section whose departure under the header makes the nav float.
    pub float_after: &'static str,
}

impl Page {
    pub fn scroll_sections(&self) -> Result<Vec<ScrollSection>, TrackerError> {
        self.sections
            .iter()
            .map(|s| ScrollSection::new(s.id, s.label, s.threshold))
            .collect()
    }

    #[cfg(test)]
    pub fn section(&self, id: &str) -> Option<&SectionCopy> {
        self.sections.iter().find(|s| s.id == id)
    }
}

pub static SITE: Page = Page {
    title: "Voltline Energy",
    sections: &[
        SectionCopy {
            id: "hero",
            label: "Home",
            threshold: 0.5,
            min_rows: 30,
            heading: "Energy that manages itself",
            body: &[
                "Metering, forecasting and load control for commercial sites.",
                "One platform from the substation to the last socket.",
                "",
                "Press 1-5 or click the navigation to jump between sections.",
            ],
        },
        SectionCopy {
            id: "about",
            label: "About",
            threshold: 0.5,
            min_rows: 24,
            heading: "Who we are",
            body: &[
                "Engineers, analysts and installers working on one goal:",
                "buildings that use less and pay less for what they use.",
                "",
                "Founded 2011  ·  140 people  ·  9 countries",
            ],
        },
        SectionCopy {
            id: "services",
            label: "Services",
            threshold: 0.3,
            min_rows: 48,
            heading: "What we do",
            body: &[
                "Solar  ─  rooftop and carport arrays sized from real load curves.",
                "",
                "Storage  ─  battery systems that shave peaks and ride out outages.",
                "",
                "Grid  ─  demand response and tariff optimisation, fully automated.",
                "",
                "Monitoring  ─  live dashboards down to the individual circuit.",
            ],
        },
        SectionCopy {
            id: "cases",
            label: "Case Studies",
            threshold: 0.75,
            min_rows: 30,
            heading: "Results",
            body: &[
                "Harbour logistics hub   ─  31% lower peak demand in year one.",
                "Municipal pool network  ─  heat recovery covering 60% of load.",
                "Regional hospital       ─  4 h islanded operation on storage.",
            ],
        },
        SectionCopy {
            id: "contact",
            label: "Contact",
            threshold: 0.6,
            min_rows: 20,
            heading: "Talk to an engineer",
            body: &[
                "hello@voltline.example",
                "+45 70 20 30 40",
                "",
                "Kalkbrænderihavnsgade 2, Copenhagen",
            ],
        },
    ],
    backdrop: Backdrop {
        container: "services",
        frames: &["Solar", "Storage", "Grid"],
    },
    float_after: "hero",
};
