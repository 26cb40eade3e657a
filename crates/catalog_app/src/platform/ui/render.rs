use chrono::{DateTime, Local};
use catalog_core::{PricingTier, SearchViewModel, ToolSummary};

const DESCRIPTION_WIDTH: usize = 72;

/// Renders the whole search surface as terminal lines.
pub fn render(view: &SearchViewModel, refreshed_at: Option<DateTime<Local>>) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(String::new());
    lines.push(header_line(view));
    if let Some(filters) = filter_line(view) {
        lines.push(filters);
    }
    if !view.categories.is_empty() {
        lines.push(category_line(view));
    }

    if !view.has_active_search {
        lines.push("Type a search term to find AI tools.".to_string());
        return lines;
    }

    if view.items.is_empty() {
        if view.is_loading {
            lines.push("Searching...".to_string());
        } else {
            lines.push(format!("No tools match \"{}\".", view.query.trim()));
        }
        return lines;
    }

    for (idx, item) in view.items.iter().enumerate() {
        lines.extend(item_lines(idx + 1, item));
    }

    lines.push(status_line(view, refreshed_at));
    lines
}

fn header_line(view: &SearchViewModel) -> String {
    let term = view.query.trim();
    let mut header = if term.is_empty() {
        "Search: (none)".to_string()
    } else {
        format!("Search: \"{term}\"")
    };
    if let Some(mode) = view.search_mode {
        header.push_str(&format!("  [{mode}]"));
    }
    if view.is_loading {
        header.push_str("  (loading)");
    }
    header
}

fn filter_line(view: &SearchViewModel) -> Option<String> {
    if view.active_filter_count == 0 {
        return None;
    }
    let mut parts = Vec::new();
    if let Some(category) = &view.category {
        let name = view
            .categories
            .iter()
            .find(|option| &option.id == category)
            .map(|option| option.name.clone())
            .unwrap_or_else(|| category.to_string());
        parts.push(format!("category={name}"));
    }
    if !view.pricing.is_empty() {
        let tiers: Vec<_> = view.pricing.iter().map(|tier| tier.label()).collect();
        parts.push(format!("pricing={}", tiers.join("|")));
    }
    if let Some(rating) = view.min_rating {
        parts.push(format!("rating {rating}"));
    }
    Some(format!(
        "Filters ({}): {}",
        view.active_filter_count,
        parts.join(", ")
    ))
}

fn category_line(view: &SearchViewModel) -> String {
    let entries: Vec<String> = view
        .categories
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let marker = if option.selected { "*" } else { "" };
            format!("{}) {}{} ({})", idx + 1, marker, option.name, option.tool_count)
        })
        .collect();
    format!("Categories: {}", entries.join("  "))
}

fn item_lines(position: usize, item: &ToolSummary) -> Vec<String> {
    let mut badges = Vec::new();
    if item.is_sponsored {
        badges.push("Sponsored");
    }
    if item.is_featured {
        badges.push("Featured");
    }
    if item.is_trending {
        badges.push("Trending");
    }

    let pricing = item
        .pricing_tier()
        .map(PricingTier::label)
        .unwrap_or(item.pricing_model.as_str());
    let mut title = format!("{position:>3}. {} [{pricing}]", item.name);
    if item.review_count > 0 {
        title.push_str(&format!(
            " {:.1}* ({} reviews)",
            item.average_rating, item.review_count
        ));
    }
    if !badges.is_empty() {
        title.push_str(&format!(" <{}>", badges.join(", ")));
    }

    let mut lines = vec![title];
    if !item.short_description.is_empty() {
        lines.push(format!("     {}", truncate(&item.short_description, DESCRIPTION_WIDTH)));
    }
    if !item.tags.is_empty() {
        let tags: Vec<String> = item.tags.iter().map(|tag| format!("#{tag}")).collect();
        lines.push(format!("     {}", tags.join(" ")));
    }
    lines
}

fn status_line(view: &SearchViewModel, refreshed_at: Option<DateTime<Local>>) -> String {
    let mut status = format!("Showing {} of {} tools", view.items.len(), view.total);
    if view.is_loading {
        status.push_str(", loading more...");
    } else if view.has_more {
        status.push_str(", :more for the next page");
    }
    if let Some(at) = refreshed_at {
        status.push_str(&format!(" (updated {})", at.format("%H:%M:%S")));
    }
    status
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

#[cfg(test)]
mod tests {
    use catalog_core::{CategoryId, CategoryOption, RatingThreshold};

    use super::*;

    fn tool(name: &str) -> ToolSummary {
        ToolSummary {
            id: name.to_lowercase(),
            name: name.to_string(),
            slug: name.to_lowercase(),
            short_description: "Turns prompts into polished drafts".to_string(),
            logo_url: None,
            category_id: None,
            pricing_model: PricingTier::Freemium.as_str().to_string(),
            starting_price: None,
            tags: vec!["writing".to_string()],
            is_featured: false,
            is_sponsored: true,
            is_trending: false,
            average_rating: 4.5,
            review_count: 8,
            rank_score: 0.0,
        }
    }

    #[test]
    fn idle_surface_prompts_for_a_term() {
        let lines = render(&SearchViewModel::default(), None);
        assert!(lines.iter().any(|line| line.contains("Type a search term")));
    }

    #[test]
    fn results_show_badges_and_paging_hint() {
        let view = SearchViewModel {
            query: "writing".to_string(),
            has_active_search: true,
            items: vec![tool("Quill")],
            total: 30,
            has_more: true,
            ..SearchViewModel::default()
        };

        let lines = render(&view, None);
        assert!(lines.contains(&"  1. Quill [Freemium] 4.5* (8 reviews) <Sponsored>".to_string()));
        assert!(lines.iter().any(|line| line.contains("#writing")));
        assert_eq!(
            lines.last().map(String::as_str),
            Some("Showing 1 of 30 tools, :more for the next page")
        );
    }

    #[test]
    fn unknown_pricing_model_is_shown_verbatim() {
        let mut item = tool("Loom");
        item.pricing_model = "lifetime_deal".to_string();
        item.is_sponsored = false;
        let lines = item_lines(2, &item);
        assert_eq!(lines[0], "  2. Loom [lifetime_deal] 4.5* (8 reviews)");
    }

    #[test]
    fn filters_are_summarized_with_category_names() {
        let video = CategoryId::new("c-video").unwrap();
        let view = SearchViewModel {
            query: "ai".to_string(),
            has_active_search: true,
            category: Some(video.clone()),
            pricing: vec![PricingTier::Free, PricingTier::OpenSource],
            min_rating: Some(RatingThreshold::Three),
            active_filter_count: 4,
            categories: vec![CategoryOption {
                id: video,
                name: "Video".to_string(),
                slug: "video".to_string(),
                tool_count: 5,
                is_featured: false,
                selected: true,
            }],
            ..SearchViewModel::default()
        };

        let lines = render(&view, None);
        assert!(lines.contains(
            &"Filters (4): category=Video, pricing=Free|Open source, rating 3+".to_string()
        ));
        assert!(lines.contains(&"Categories: 1) *Video (5)".to_string()));
        assert!(lines.contains(&"No tools match \"ai\".".to_string()));
    }

    #[test]
    fn long_descriptions_are_cut() {
        let long = "x".repeat(100);
        let cut = truncate(&long, 10);
        assert_eq!(cut, "xxxxxxx...");
    }
}
