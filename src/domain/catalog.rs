//! Static catalog data: price plans, add-on features and portfolio sections.
//!
//! This is the single source of minimum tiers; pruning and toggling both read
//! from it.

use crate::domain::eligibility::{OptionClass, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogOption {
    pub id: &'static str,
    pub title: &'static str,
    pub min_tier: Tier,
}

#[derive(Debug, Clone, Copy)]
pub struct SectionCategory {
    pub name: &'static str,
    pub description: &'static str,
    pub options: &'static [CatalogOption],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricePlan {
    /// Amount in rupees, also the value persisted as `priceRange`.
    pub value: &'static str,
    pub label: &'static str,
    pub tier: Tier,
    pub slogan: &'static str,
    pub highlights: &'static [&'static str],
    pub insight: &'static str,
    pub badge: Option<&'static str>,
}

#[derive(Debug)]
pub struct Catalog {
    plans: &'static [PricePlan],
    features: &'static [CatalogOption],
    section_categories: &'static [SectionCategory],
}

const fn option(id: &'static str, title: &'static str, min_tier: Tier) -> CatalogOption {
    CatalogOption { id, title, min_tier }
}

static PLANS: [PricePlan; 3] = [
    PricePlan {
        value: "99",
        label: "Foundation",
        tier: Tier::Essential,
        slogan: "Your essential digital footprint, simplified.",
        highlights: &[
            "Single-page responsive design",
            "Curated template selection",
            "Personalized content integration",
        ],
        insight: "Initiate your professional journey. A strategic investment for immediate impact.",
        badge: None,
    },
    PricePlan {
        value: "199",
        label: "Ascend",
        tier: Tier::Enhanced,
        slogan: "Elevate your professional narrative with dynamic presentation.",
        highlights: &[
            "Multi-section interactive layout",
            "Customized brand aesthetics",
            "Subtle scroll animations",
            "Dedicated contact module",
        ],
        insight: "Command attention. Your expertise, showcased with refined precision.",
        badge: Some("Most Popular"),
    },
    PricePlan {
        value: "399",
        label: "Apex",
        tier: Tier::Premium,
        slogan: "Establish unparalleled authority and strategic digital presence.",
        highlights: &[
            "Comprehensive multi-page structure",
            "Advanced interactive elements",
            "Seamless social media integration",
            "Optimized for search engines (SEO)",
        ],
        insight: "Define your legacy. A distinguished platform for leading industry visionaries.",
        badge: None,
    },
];

static FEATURES: [CatalogOption; 7] = [
    option("contactForm", "Interactive Contact Form", Tier::Essential),
    option("advancedAnimations", "Advanced Animations & Interactions", Tier::Premium),
    option("socialShare", "Social Media Share Buttons", Tier::Enhanced),
    option("basicAnalytics", "Basic Analytics Integration", Tier::Enhanced),
    option("siteSearch", "Site Search Functionality", Tier::Premium),
    option("dynamicContentFilters", "Dynamic Content Filters (e.g., projects)", Tier::Premium),
    option("accessibilityFeatures", "Advanced Accessibility Features", Tier::Enhanced),
];

static SECTION_CATEGORIES: [SectionCategory; 5] = [
    SectionCategory {
        name: "Core Essentials",
        description: "Fundamental sections for any professional portfolio to establish your online presence.",
        options: &[
            option("profilePhoto", "Profile Photo & Header", Tier::Essential),
            option("aboutMe", "About Me / Bio", Tier::Essential),
            option("contactInfo", "Contact Information", Tier::Essential),
            option("services", "Services Offered", Tier::Enhanced),
            option("callToAction", "Call to Action", Tier::Enhanced),
        ],
    },
    SectionCategory {
        name: "Professional Showcase",
        description: "Highlight your expertise, career journey, and significant contributions.",
        options: &[
            option("resume", "Resume / CV", Tier::Essential),
            option("skills", "Skills & Expertise", Tier::Essential),
            option("experience", "Work Experience", Tier::Enhanced),
            option("education", "Education & Qualifications", Tier::Essential),
            option("achievements", "Awards & Achievements", Tier::Essential),
            option("projects", "Notable Projects", Tier::Essential),
            option("codeSnippets", "Code Snippets / Gists", Tier::Premium),
        ],
    },
    SectionCategory {
        name: "Impact & Credibility",
        description: "Build trust, validate your skills, and showcase your professional recognition.",
        options: &[
            option("testimonials", "Client Testimonials", Tier::Premium),
            option("certificates", "Certifications", Tier::Essential),
            option("publications", "Publications / Articles", Tier::Premium),
            option("caseStudies", "Case Studies / Portfolio Items", Tier::Premium),
        ],
    },
    SectionCategory {
        name: "Creative Media & Assets",
        description: "Showcase your visual work, audio samples, and dynamic content.",
        options: &[
            option("imageGallery", "Image Gallery", Tier::Enhanced),
            option("videoShowcase", "Video Showcase", Tier::Premium),
            option("audioSamples", "Audio Samples", Tier::Premium),
            option("animationsGraphics", "Animations", Tier::Premium),
        ],
    },
    SectionCategory {
        name: "Engagement & Growth",
        description: "Grow your audience and keep visitors coming back.",
        options: &[
            option("blog", "Blog / Latest Posts", Tier::Enhanced),
            option("newsletter", "Newsletter Signup", Tier::Enhanced),
            option("faq", "FAQ Section", Tier::Enhanced),
            option("socialIcons", "Social Media Links", Tier::Essential),
            option("customSection", "Custom Section", Tier::Premium),
        ],
    },
];

static STANDARD: Catalog = Catalog {
    plans: &PLANS,
    features: &FEATURES,
    section_categories: &SECTION_CATEGORIES,
};

impl Catalog {
    pub fn standard() -> &'static Catalog {
        &STANDARD
    }

    pub fn plans(&self) -> &'static [PricePlan] {
        self.plans
    }

    pub fn features(&self) -> &'static [CatalogOption] {
        self.features
    }

    pub fn section_categories(&self) -> &'static [SectionCategory] {
        self.section_categories
    }

    pub fn sections(&self) -> impl Iterator<Item = &'static CatalogOption> + '_ {
        self.section_categories
            .iter()
            .flat_map(|category| category.options.iter())
    }

    pub fn options(&self, class: OptionClass) -> Vec<&'static CatalogOption> {
        match class {
            OptionClass::Feature => self.features.iter().collect(),
            OptionClass::Section => self.sections().collect(),
        }
    }

    pub fn find(&self, class: OptionClass, id: &str) -> Option<&'static CatalogOption> {
        match class {
            OptionClass::Feature => self.features.iter().find(|o| o.id == id),
            OptionClass::Section => self.sections().find(|o| o.id == id),
        }
    }

    /// Unknown ids resolve to the highest tier so they never leak downwards.
    pub fn minimum_tier(&self, class: OptionClass, id: &str) -> Tier {
        self.find(class, id)
            .map(|o| o.min_tier)
            .unwrap_or(Tier::HIGHEST)
    }

    pub fn plan_for_tier(&self, tier: Tier) -> Option<&'static PricePlan> {
        self.plans.iter().find(|p| p.tier == tier)
    }

    pub fn plan_for_value(&self, value: &str) -> Option<&'static PricePlan> {
        self.plans.iter().find(|p| p.value == value)
    }

    /// Accepts a plan amount ("199"), label ("Ascend") or tier name ("enhanced").
    pub fn resolve_plan(&self, reference: &str) -> Option<&'static PricePlan> {
        let reference = reference.trim();
        self.plan_for_value(reference)
            .or_else(|| {
                self.plans
                    .iter()
                    .find(|p| p.label.eq_ignore_ascii_case(reference))
            })
            .or_else(|| Tier::parse(reference).and_then(|tier| self.plan_for_tier(tier)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_tier_has_exactly_one_plan() {
        let catalog = Catalog::standard();
        for tier in Tier::ALL {
            let count = catalog.plans().iter().filter(|p| p.tier == tier).count();
            assert_eq!(count, 1, "tier {tier}");
        }
    }

    #[test]
    fn test_option_ids_are_unique_per_class() {
        let catalog = Catalog::standard();
        for class in [OptionClass::Feature, OptionClass::Section] {
            let options = catalog.options(class);
            let ids: HashSet<_> = options.iter().map(|o| o.id).collect();
            assert_eq!(ids.len(), options.len(), "{class}");
        }
    }

    #[test]
    fn test_resolve_plan_by_value_label_and_tier() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.resolve_plan("199").map(|p| p.label), Some("Ascend"));
        assert_eq!(catalog.resolve_plan("apex").map(|p| p.value), Some("399"));
        assert_eq!(catalog.resolve_plan("essential").map(|p| p.value), Some("99"));
        assert!(catalog.resolve_plan("platinum").is_none());
    }

    #[test]
    fn test_minimum_tier_lookup() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.minimum_tier(OptionClass::Feature, "contactForm"), Tier::Essential);
        assert_eq!(catalog.minimum_tier(OptionClass::Section, "blog"), Tier::Enhanced);
        assert_eq!(catalog.minimum_tier(OptionClass::Section, "contactForm"), Tier::Premium);
    }
}
