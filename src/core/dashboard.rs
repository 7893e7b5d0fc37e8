use crate::domain::catalog::Catalog;
use crate::domain::model::{SortDirection, StoredOrder};
use crate::domain::ports::OrderStore;
use crate::utils::error::{IntakeError, Result};
use std::fmt::Write as _;

pub const ORDER_BY_FIELD: &str = "submissionDate";

/// Read-only view over submitted orders.
pub struct Dashboard<O: OrderStore> {
    orders: O,
}

impl<O: OrderStore> Dashboard<O> {
    pub fn new(orders: O) -> Self {
        Self { orders }
    }

    pub async fn newest_first(&self) -> Result<Vec<StoredOrder>> {
        self.fetch(SortDirection::Descending).await
    }

    pub async fn fetch(&self, direction: SortDirection) -> Result<Vec<StoredOrder>> {
        let orders = self.orders.list_orders(ORDER_BY_FIELD, direction).await?;
        tracing::info!("Fetched {} orders", orders.len());
        Ok(orders)
    }
}

fn plan_line(order: &StoredOrder, catalog: &Catalog) -> String {
    match order.order.price_range.as_deref() {
        Some(value) => match catalog.plan_for_value(value) {
            Some(plan) => format!("₹{} ({})", value, plan.label),
            None => format!("₹{}", value),
        },
        None => "Not Selected".to_string(),
    }
}

fn bullet_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "{}:", title);
    for item in items {
        let _ = writeln!(out, "  - {}", item);
    }
}

pub fn render_text(orders: &[StoredOrder], catalog: &Catalog) -> String {
    if orders.is_empty() {
        return "No orders received yet. Stay tuned!\n".to_string();
    }

    let mut out = String::new();
    for stored in orders {
        let order = &stored.order;
        let _ = writeln!(out, "== {} [{}]", order.name, stored.id);
        let _ = writeln!(out, "Email: {}", order.email);
        let _ = writeln!(out, "Plan: {}", plan_line(stored, catalog));
        let submitted = order
            .submission_date
            .map(|date| date.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let _ = writeln!(out, "Submitted: {}", submitted);

        let style = if order.desired_portfolio_style.is_empty() {
            "Not provided"
        } else {
            order.desired_portfolio_style.as_str()
        };
        let _ = writeln!(out, "Desired Style: {}", style);

        bullet_list(&mut out, "Achievements", &order.achievements);

        let projects: Vec<String> = order
            .projects
            .iter()
            .map(|p| {
                let time = if p.time.is_empty() { "N/A" } else { p.time.as_str() };
                if p.link.is_empty() {
                    format!("{} ({})", p.name, time)
                } else {
                    format!("{} ({}) {}", p.name, time, p.link)
                }
            })
            .collect();
        bullet_list(&mut out, "Projects", &projects);

        let links: Vec<String> = order
            .social_links
            .iter()
            .map(|l| format!("{}: {}", l.platform, l.url))
            .collect();
        bullet_list(&mut out, "Social Links", &links);
        bullet_list(&mut out, "Selected Features", &order.selected_features);
        bullet_list(&mut out, "Portfolio Sections", &order.selected_sections);

        if !order.preferred_colors.is_empty() {
            let _ = writeln!(out, "Preferred Colors: {}", order.preferred_colors.join(", "));
        }
        if !order.other_requirements.is_empty() {
            let _ = writeln!(out, "Other Requirements: {}", order.other_requirements);
        }

        let files = [
            ("Resume", &order.resume),
            ("Profile Photo", &order.profile_photo),
            ("Payment Proof", &order.payment_screenshot),
        ];
        if files.iter().any(|(_, url)| url.is_some()) {
            let _ = writeln!(out, "Attached Files:");
            for (label, url) in files {
                if let Some(url) = url {
                    let _ = writeln!(out, "  {}: {}", label, url);
                }
            }
        }
        out.push('\n');
    }
    out
}

pub fn render_json(orders: &[StoredOrder]) -> Result<String> {
    Ok(serde_json::to_string_pretty(orders)?)
}

const CSV_HEADER: [&str; 16] = [
    "id",
    "submissionDate",
    "name",
    "email",
    "priceRange",
    "desiredPortfolioStyle",
    "achievements",
    "projects",
    "socialLinks",
    "selectedFeatures",
    "portfolioSections",
    "preferredColors",
    "otherRequirements",
    "resume",
    "profilePhoto",
    "paymentScreenshot",
];

/// Flat export; list fields are joined with "; ".
pub fn render_csv(orders: &[StoredOrder]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;

    for stored in orders {
        let order = &stored.order;
        let projects: Vec<&str> = order.projects.iter().map(|p| p.name.as_str()).collect();
        let links: Vec<String> = order
            .social_links
            .iter()
            .map(|l| format!("{}: {}", l.platform, l.url))
            .collect();

        writer.write_record([
            stored.id.clone(),
            order
                .submission_date
                .map(|date| date.to_rfc3339())
                .unwrap_or_default(),
            order.name.clone(),
            order.email.clone(),
            order.price_range.clone().unwrap_or_default(),
            order.desired_portfolio_style.clone(),
            order.achievements.join("; "),
            projects.join("; "),
            links.join("; "),
            order.selected_features.join("; "),
            order.selected_sections.join("; "),
            order.preferred_colors.join("; "),
            order.other_requirements.clone(),
            order.resume.clone().unwrap_or_default(),
            order.profile_photo.clone().unwrap_or_default(),
            order.payment_screenshot.clone().unwrap_or_default(),
        ])?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| IntakeError::IoError(e.into_error()))?;
    String::from_utf8(data).map_err(|e| IntakeError::MalformedDataError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Order, Project};

    fn stored(id: &str, order: Order) -> StoredOrder {
        StoredOrder {
            id: id.to_string(),
            order,
        }
    }

    #[test]
    fn test_render_text_empty() {
        assert_eq!(
            render_text(&[], Catalog::standard()),
            "No orders received yet. Stay tuned!\n"
        );
    }

    #[test]
    fn test_render_text_defaults_for_missing_fields() {
        let orders = [stored(
            "o1",
            Order {
                name: "Ravi".to_string(),
                email: "ravi@example.com".to_string(),
                projects: vec![Project {
                    name: "Atlas".to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            },
        )];

        let text = render_text(&orders, Catalog::standard());
        assert!(text.contains("Plan: Not Selected"));
        assert!(text.contains("Submitted: N/A"));
        assert!(text.contains("Desired Style: Not provided"));
        assert!(text.contains("  - Atlas (N/A)"));
        assert!(!text.contains("Attached Files"));
    }

    #[test]
    fn test_render_text_plan_and_files() {
        let orders = [stored(
            "o2",
            Order {
                name: "Sarah".to_string(),
                price_range: Some("199".to_string()),
                payment_screenshot: Some("https://files/upi.png".to_string()),
                ..Default::default()
            },
        )];

        let text = render_text(&orders, Catalog::standard());
        assert!(text.contains("Plan: ₹199 (Ascend)"));
        assert!(text.contains("  Payment Proof: https://files/upi.png"));
    }

    #[test]
    fn test_render_csv_joins_lists() {
        let orders = [stored(
            "o3",
            Order {
                name: "Mei, Lin".to_string(),
                selected_features: vec!["contactForm".to_string(), "siteSearch".to_string()],
                ..Default::default()
            },
        )];

        let csv = render_csv(&orders).unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("id,submissionDate,name,email"));
        let row = lines.next().unwrap();
        assert!(row.contains("\"Mei, Lin\""));
        assert!(row.contains("contactForm; siteSearch"));
    }
}
