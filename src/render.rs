//! Text rendering of the browser.
//!
//! Rendering is a pure function of a [`Scene`]: the view state, whatever the
//! query cache holds for the keys that state currently depends on, and the
//! drawer if one is mounted. Lists are filtered here on every frame.

use crate::drawer::Drawer;
use crate::error::BrowserError;
use crate::filter::filter_by_name;
use crate::geometry::{Cutout, Rect};
use crate::model::{MealDetail, MealSummary};
use crate::query::{Fetched, Payload, QueryCache, QueryKey};
use crate::state::{ListFilter, Tab, ViewState};

/// Frames narrower than this get the compact header
pub const COMPACT_WIDTH: usize = 60;
pub const CARD_WIDTH: usize = 30;
pub const SKELETON_CARDS: usize = 8;
pub const MAX_PANEL_WIDTH: usize = 72;

const SHADE: char = '░';
const UNAVAILABLE: &str = "(recipe service unavailable)";

pub struct Scene<'a> {
    pub state: &'a ViewState,
    pub cache: &'a QueryCache,
    pub drawer: Option<&'a Drawer>,
}

/// Loading state of one query as the view sees it
enum Slot<'a> {
    Loading,
    Unavailable,
    Ready(&'a Payload),
    Idle,
}

fn slot<'a>(cache: &'a QueryCache, key: &QueryKey) -> Slot<'a> {
    if cache.is_loading(key) {
        return Slot::Loading;
    }
    match cache.get(key) {
        Some(Fetched::Ready(payload)) => Slot::Ready(payload),
        Some(Fetched::Unavailable(_)) => Slot::Unavailable,
        None => Slot::Idle,
    }
}

pub fn render(scene: &Scene<'_>, width: usize) -> String {
    let width = width.max(20);
    let mut lines = header(scene.state.tab, width);

    if scene.state.tab != Tab::Browse {
        lines.push(search_row(&scene.state.term));
        lines.push(String::new());
    }

    match scene.state.tab {
        Tab::Browse => browse(scene, width, &mut lines),
        Tab::Search => search(scene, width, &mut lines),
        Tab::Special => special(scene, width, &mut lines),
    }

    if let (Some(drawer), Some(id)) = (scene.drawer, scene.state.selected_id.as_ref()) {
        let key = QueryKey::Lookup(id.clone());
        let panel = panel_lines(slot(scene.cache, &key), drawer, width);
        lines = overlay(lines, &panel, width);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn header(tab: Tab, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    if width < COMPACT_WIDTH {
        let nav = format!("Navigate: <{}>", tab.label());
        lines.push(spread("Chefora", &nav, width));
    } else {
        lines.push("Chefora - Your Personal AI Culinary Assistant".to_string());
        let tabs: Vec<String> = Tab::ALL
            .iter()
            .map(|t| {
                if *t == tab {
                    format!("[{}]", t.label())
                } else {
                    format!(" {} ", t.label())
                }
            })
            .collect();
        lines.push(tabs.join(" "));
    }
    lines.push("─".repeat(width));
    lines
}

fn search_row(term: &str) -> String {
    if term.is_empty() {
        "Search ingredients... e.g., chicken, tomato, rice   [Search]".to_string()
    } else {
        format!("Search ingredients: {}   [Search]", term)
    }
}

fn browse(scene: &Scene<'_>, width: usize, lines: &mut Vec<String>) {
    let state = scene.state;

    lines.push("Browse by Category".to_string());
    let names = match slot(scene.cache, &QueryKey::Categories) {
        Slot::Ready(payload) => ChipList::Ready(
            filter_by_name(payload.categories(), &state.category_filter.query)
                .into_iter()
                .map(|c| c.name.as_str())
                .collect(),
        ),
        Slot::Unavailable => ChipList::Unavailable,
        Slot::Loading | Slot::Idle => ChipList::Pending,
    };
    chip_section(
        "Filter categories...",
        "categories",
        &state.category_filter,
        names,
        &state.category,
        width,
        lines,
    );
    meal_grid(
        slot(scene.cache, &QueryKey::ByCategory(state.category.clone())),
        width,
        lines,
    );
    lines.push(String::new());

    lines.push("Browse by Area".to_string());
    let names = match slot(scene.cache, &QueryKey::Areas) {
        Slot::Ready(payload) => ChipList::Ready(
            filter_by_name(payload.areas(), &state.area_filter.query)
                .into_iter()
                .map(|a| a.name.as_str())
                .collect(),
        ),
        Slot::Unavailable => ChipList::Unavailable,
        Slot::Loading | Slot::Idle => ChipList::Pending,
    };
    chip_section(
        "Filter areas...",
        "areas",
        &state.area_filter,
        names,
        &state.area,
        width,
        lines,
    );
    meal_grid(
        slot(scene.cache, &QueryKey::ByArea(state.area.clone())),
        width,
        lines,
    );
}

fn search(scene: &Scene<'_>, width: usize, lines: &mut Vec<String>) {
    lines.push(format!("Results for “{}”", scene.state.term));
    if let Some(key) = scene.state.search_key() {
        meal_grid(slot(scene.cache, &key), width, lines);
    }
}

fn special(scene: &Scene<'_>, width: usize, lines: &mut Vec<String>) {
    let current = slot(scene.cache, &scene.state.special_key());
    let rolling = matches!(current, Slot::Loading);
    let button = if rolling { "[Rolling...]" } else { "[New random]" };
    lines.push(spread("Chef's Special", button, width));

    match current {
        Slot::Loading => lines.extend(skeleton_card(CARD_WIDTH.min(width))),
        Slot::Unavailable => lines.push(UNAVAILABLE.to_string()),
        Slot::Ready(payload) => {
            if let Some(meal) = payload.meal() {
                let inner = width.min(MAX_PANEL_WIDTH);
                lines.push(format!("┌{}┐", "─".repeat(inner - 2)));
                lines.push(boxed(&meal.name, inner));
                let subtitle = format!(
                    "{} • {}",
                    meal.category.as_deref().unwrap_or("?"),
                    meal.area.as_deref().unwrap_or("?")
                );
                lines.push(boxed(&subtitle, inner));
                lines.push(boxed(&format!("#{}  View details", meal.id), inner));
                lines.push(format!("└{}┘", "─".repeat(inner - 2)));
            }
        }
        Slot::Idle => {}
    }
}

/// Chip names left after filtering
enum ChipList<'a> {
    Pending,
    Unavailable,
    Ready(Vec<&'a str>),
}

fn chip_section(
    placeholder: &str,
    noun: &str,
    filter: &ListFilter,
    names: ChipList<'_>,
    selected: &str,
    width: usize,
    lines: &mut Vec<String>,
) {
    let toggle = if filter.expanded { "[Collapse]" } else { "[Show all]" };
    let input = if filter.query.is_empty() {
        placeholder.to_string()
    } else {
        format!("Filter: {}", filter.query)
    };
    lines.push(spread(&input, toggle, width));

    let names = match names {
        ChipList::Pending => return,
        ChipList::Unavailable => {
            lines.push(UNAVAILABLE.to_string());
            return;
        }
        ChipList::Ready(names) => names,
    };
    if names.is_empty() {
        lines.push(format!("No {} match “{}”.", noun, filter.query));
        return;
    }
    let chips: Vec<String> = names
        .iter()
        .map(|name| {
            if *name == selected {
                format!("[*{}*]", name)
            } else {
                format!("( {} )", name)
            }
        })
        .collect();

    if filter.expanded {
        lines.extend(wrap_words(&chips, width));
    } else {
        lines.push(single_row(&chips, width));
    }
}

/// As many chips as fit on one row, then an overflow count
fn single_row(chips: &[String], width: usize) -> String {
    let mut row = String::new();
    for (i, chip) in chips.iter().enumerate() {
        let rest = chips.len() - i;
        let more = format!(" +{} more", rest);
        let sep = if row.is_empty() { 0 } else { 1 };
        let needed = len(&row) + sep + len(chip);
        let reserve = if rest > 1 { len(&more) } else { 0 };
        if needed + reserve > width {
            row.push_str(&more);
            return row;
        }
        if sep == 1 {
            row.push(' ');
        }
        row.push_str(chip);
    }
    row
}

fn meal_grid(slot: Slot<'_>, width: usize, lines: &mut Vec<String>) {
    match slot {
        Slot::Loading => lines.extend(skeleton_grid(width)),
        Slot::Unavailable => lines.push(UNAVAILABLE.to_string()),
        Slot::Ready(payload) => {
            if payload.meals().is_empty() {
                lines.push("No recipes found.".to_string());
            } else {
                lines.extend(render_cards(payload.meals(), width));
            }
        }
        Slot::Idle => {}
    }
}

/// Meal cards laid out in as many columns as the width allows
pub fn render_cards(meals: &[MealSummary], width: usize) -> Vec<String> {
    let columns = (width / CARD_WIDTH).max(1);
    let card_width = CARD_WIDTH.min(width);
    let mut lines = Vec::new();

    for row in meals.chunks(columns) {
        let cards: Vec<[String; 2]> = row
            .iter()
            .map(|meal| {
                [
                    pad(&truncate(&meal.name, card_width - 1), card_width),
                    pad(&format!("#{} View details", meal.id), card_width),
                ]
            })
            .collect();
        for line in 0..2 {
            let joined: String = cards.iter().map(|c| c[line].as_str()).collect();
            lines.push(joined.trim_end().to_string());
        }
        lines.push(String::new());
    }
    lines
}

fn skeleton_card(width: usize) -> Vec<String> {
    vec![
        SHADE.to_string().repeat(width.saturating_sub(4)),
        SHADE.to_string().repeat(width / 2),
    ]
}

fn skeleton_grid(width: usize) -> Vec<String> {
    let columns = (width / CARD_WIDTH).max(1);
    let card_width = CARD_WIDTH.min(width);
    let mut lines = Vec::new();
    let mut remaining = SKELETON_CARDS;
    while remaining > 0 {
        let in_row = remaining.min(columns);
        let card = skeleton_card(card_width);
        for line in card {
            let cell = pad(&line, card_width);
            lines.push(cell.repeat(in_row).trim_end().to_string());
        }
        lines.push(String::new());
        remaining -= in_row;
    }
    lines
}

/// Body of the detail panel, without its border
pub fn render_detail(meal: &MealDetail, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!(
        "Category: {}",
        meal.category.as_deref().unwrap_or("-")
    ));
    lines.push(format!("Area: {}", meal.area.as_deref().unwrap_or("-")));
    if let Some(thumb) = &meal.thumbnail {
        lines.push(format!("Image: {}", thumb));
    }

    if !meal.ingredients().is_empty() {
        lines.push(String::new());
        lines.push("Ingredients".to_string());
        for ingredient in meal.ingredients() {
            let entry = if ingredient.measure.is_empty() {
                format!("• {}", ingredient.name)
            } else {
                format!("• {} {}", ingredient.measure, ingredient.name)
            };
            lines.extend(wrap_text(&entry, width, "  "));
        }
    }

    let steps = meal.instruction_steps();
    if !steps.is_empty() {
        lines.push(String::new());
        lines.push("Instructions".to_string());
        for (i, step) in steps.iter().enumerate() {
            let prefix = format!("{}. ", i + 1);
            let indent = " ".repeat(len(&prefix));
            let wrapped = wrap_text(step, width.saturating_sub(len(&prefix)).max(10), "");
            for (j, line) in wrapped.into_iter().enumerate() {
                if j == 0 {
                    lines.push(format!("{}{}", prefix, line));
                } else {
                    lines.push(format!("{}{}", indent, line));
                }
            }
        }
    }
    lines
}

/// Output of a one-shot lookup: the recipe, "not found", or "unavailable"
pub fn render_lookup(
    id: &str,
    result: &Result<Option<MealDetail>, BrowserError>,
    width: usize,
) -> Vec<String> {
    match result {
        Ok(Some(meal)) => {
            let mut lines = vec![meal.name.clone(), "=".repeat(len(&meal.name))];
            lines.extend(render_detail(meal, width));
            lines
        }
        Ok(None) => vec![format!("No recipe found for id {}", id)],
        Err(e) => vec![format!("Recipe service unavailable: {}", e)],
    }
}

fn panel_lines(detail: Slot<'_>, drawer: &Drawer, width: usize) -> Vec<String> {
    let panel_width = width.saturating_sub(2 * 6).clamp(20, MAX_PANEL_WIDTH);
    let inner = panel_width - 4;

    let (title, body) = match detail {
        Slot::Ready(payload) => match payload.meal() {
            Some(meal) => (meal.name.clone(), render_detail(meal, inner)),
            None => ("Recipe".to_string(), vec!["Recipe not found.".to_string()]),
        },
        Slot::Unavailable => ("Recipe".to_string(), vec![UNAVAILABLE.to_string()]),
        Slot::Loading | Slot::Idle => ("Recipe".to_string(), skeleton_card(inner)),
    };

    let mut lines = Vec::new();
    let tag = format!("┤ {} ├", drawer.class_name());
    let top_fill = panel_width.saturating_sub(2 + len(&tag) + 1);
    lines.push(format!("┌─{}{}┐", tag, "─".repeat(top_fill)));
    lines.push(boxed(
        &spread(&truncate(&title, inner - 4), "[x]", inner),
        panel_width,
    ));
    lines.push(boxed("", panel_width));
    for line in body {
        lines.push(boxed(&line, panel_width));
    }
    lines.push(format!("└{}┘", "─".repeat(panel_width - 2)));
    lines
}

/// Darken the page around a centered panel, leaving the padded, rounded
/// cut-out around the panel clear
fn overlay(page: Vec<String>, panel: &[String], width: usize) -> Vec<String> {
    let panel_w = panel.first().map(|l| len(l.as_str())).unwrap_or(0) as i32;
    let panel_h = panel.len() as i32;
    let height = page.len().max(panel.len() + 10) as i32;

    let frame = Rect::new(0, 0, width as i32, height);
    let rect = frame.centered(panel_w, panel_h);
    let cutout = Cutout::around(rect);

    let mut canvas: Vec<Vec<char>> = (0..height as usize)
        .map(|y| {
            let mut row: Vec<char> = page.get(y).map(|l| l.chars().collect()).unwrap_or_default();
            row.resize(width, ' ');
            row.truncate(width);
            row
        })
        .collect();

    for (y, row) in canvas.iter_mut().enumerate() {
        for (x, cell) in row.iter_mut().enumerate() {
            if !cutout.contains(x as i32, y as i32) {
                *cell = SHADE;
            }
        }
    }

    for (dy, line) in panel.iter().enumerate() {
        let y = (rect.y as usize) + dy;
        let Some(row) = canvas.get_mut(y) else { break };
        for (dx, c) in line.chars().enumerate() {
            let x = rect.x as usize + dx;
            if x < row.len() {
                row[x] = c;
            }
        }
    }

    canvas
        .into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
        .collect()
}

fn boxed(text: &str, width: usize) -> String {
    let inner = width.saturating_sub(4);
    format!("│ {} │", pad(&truncate(text, inner), inner))
}

/// `left` and `right` on one line, pushed apart to fill `width`
fn spread(left: &str, right: &str, width: usize) -> String {
    let gap = width.saturating_sub(len(left) + len(right)).max(1);
    format!("{}{}{}", left, " ".repeat(gap), right)
}

fn len(s: &str) -> usize {
    s.chars().count()
}

fn pad(s: &str, width: usize) -> String {
    let n = len(s);
    if n >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - n))
    }
}

fn truncate(s: &str, width: usize) -> String {
    if len(s) <= width {
        return s.to_string();
    }
    let kept: String = s.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

fn wrap_words(words: &[String], width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in words {
        if !line.is_empty() && len(&line) + 1 + len(word) > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn wrap_text(text: &str, width: usize, indent: &str) -> Vec<String> {
    let words: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    let mut lines = wrap_words(&words, width.max(1));
    for line in lines.iter_mut().skip(1) {
        line.insert_str(0, indent);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Area, Category};
    use std::time::{Duration, Instant};

    fn summary(id: &str, name: &str) -> MealSummary {
        MealSummary {
            id: id.to_string(),
            name: name.to_string(),
            thumbnail: None,
        }
    }

    fn categories(names: &[&str]) -> Payload {
        Payload::Categories(
            names
                .iter()
                .map(|n| Category {
                    name: n.to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn test_header_compact_and_full() {
        let full = header(Tab::Search, 100);
        assert!(full[1].contains("[Search]"));
        assert!(full[1].contains(" Browse "));

        let compact = header(Tab::Special, 40);
        assert!(compact[0].starts_with("Chefora"));
        assert!(compact[0].ends_with("Navigate: <Chef's Special>"));
    }

    #[test]
    fn test_browse_filters_category_chips() {
        let state = {
            let mut s = ViewState::default();
            s.set_category_query("ch");
            s
        };
        let mut cache = QueryCache::new();
        cache.complete(
            QueryKey::Categories,
            Fetched::Ready(categories(&["Beef", "Chicken", "Vegan"])),
        );
        let scene = Scene {
            state: &state,
            cache: &cache,
            drawer: None,
        };
        let out = render(&scene, 100);
        assert!(out.contains("( Chicken )"));
        assert!(!out.contains("Vegan"));
        assert!(out.contains("Filter: ch"));
    }

    #[test]
    fn test_filter_without_matches_says_so() {
        let mut state = ViewState::default();
        state.set_category_query("zzz");
        state.set_area_query("atlantis");
        let mut cache = QueryCache::new();
        cache.complete(
            QueryKey::Categories,
            Fetched::Ready(categories(&["Beef", "Chicken"])),
        );
        cache.complete(
            QueryKey::Areas,
            Fetched::Ready(Payload::Areas(vec![Area {
                name: "Italian".into(),
            }])),
        );
        let scene = Scene {
            state: &state,
            cache: &cache,
            drawer: None,
        };
        let out = render(&scene, 100);
        assert!(out.contains("No categories match “zzz”."));
        assert!(out.contains("No areas match “atlantis”."));
        assert!(!out.contains("( Chicken )"));
    }

    #[test]
    fn test_loading_chips_have_no_match_message() {
        let mut state = ViewState::default();
        state.set_category_query("zzz");
        let mut cache = QueryCache::new();
        cache.mark_in_flight(QueryKey::Categories);
        let scene = Scene {
            state: &state,
            cache: &cache,
            drawer: None,
        };
        assert!(!render(&scene, 100).contains("No categories match"));
    }

    #[test]
    fn test_selected_chip_is_marked() {
        let state = ViewState::default();
        let mut cache = QueryCache::new();
        cache.complete(
            QueryKey::Categories,
            Fetched::Ready(categories(&["Beef", "Chicken"])),
        );
        let scene = Scene {
            state: &state,
            cache: &cache,
            drawer: None,
        };
        assert!(render(&scene, 100).contains("[*Beef*]"));
    }

    #[test]
    fn test_collapsed_row_reports_overflow() {
        let chips: Vec<String> = (0..20).map(|i| format!("( Chip{} )", i)).collect();
        let row = single_row(&chips, 40);
        assert!(row.contains("more"));
        assert!(len(&row) <= 40);

        let wrapped = wrap_words(&chips, 40);
        assert!(wrapped.len() > 1);
        assert!(wrapped.iter().all(|l| len(l) <= 40));
    }

    #[test]
    fn test_loading_and_unavailable_grids() {
        let state = ViewState::default();
        let mut cache = QueryCache::new();
        cache.mark_in_flight(QueryKey::ByCategory("Beef".into()));
        cache.complete(
            QueryKey::ByArea("Italian".into()),
            Fetched::Unavailable("status 500".into()),
        );
        let scene = Scene {
            state: &state,
            cache: &cache,
            drawer: None,
        };
        let out = render(&scene, 100);
        assert!(out.contains(SHADE));
        assert!(out.contains(UNAVAILABLE));
    }

    #[test]
    fn test_search_results_grid() {
        let mut state = ViewState::default();
        state.set_tab(Tab::Search);
        state.set_term("rice");
        let mut cache = QueryCache::new();
        cache.complete(
            QueryKey::ByIngredient("rice".into()),
            Fetched::Ready(Payload::Meals(vec![
                summary("1", "Kedgeree"),
                summary("2", "Paella"),
            ])),
        );
        let scene = Scene {
            state: &state,
            cache: &cache,
            drawer: None,
        };
        let out = render(&scene, 100);
        assert!(out.contains("Results for “rice”"));
        assert!(out.contains("Kedgeree"));
        assert!(out.contains("#2 View details"));
    }

    #[test]
    fn test_cards_use_columns() {
        let meals = vec![summary("1", "A"), summary("2", "B"), summary("3", "C")];
        let lines = render_cards(&meals, 60);
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with('A'));
        assert!(lines[0].contains('B'));
        assert!(lines[3].starts_with('C'));
    }

    #[test]
    fn test_drawer_overlay_shows_panel_and_backdrop() {
        let mut state = ViewState::default();
        state.select_meal("52772");
        let mut cache = QueryCache::new();
        let meal: MealDetail = serde_json::from_str(
            r#"{"idMeal": "52772", "strMeal": "Teriyaki Chicken Casserole",
                "strCategory": "Chicken", "strArea": "Japanese",
                "strInstructions": "Preheat oven. Bake it.",
                "strIngredient1": "soy sauce", "strMeasure1": "3/4 cup"}"#,
        )
        .unwrap();
        cache.complete(
            QueryKey::Lookup("52772".into()),
            Fetched::Ready(Payload::Meal(Some(meal))),
        );
        let drawer = Drawer::open(Instant::now(), Duration::from_millis(700));
        let scene = Scene {
            state: &state,
            cache: &cache,
            drawer: Some(&drawer),
        };
        let out = render(&scene, 100);
        assert!(out.contains("Teriyaki Chicken Casserole"));
        assert!(out.contains("┤ enter ├"));
        assert!(out.contains("• 3/4 cup soy sauce"));
        assert!(out.contains("1. Preheat oven"));
        assert!(out.contains("2. Bake it."));
        assert!(out.lines().next().unwrap().starts_with(SHADE));
    }

    #[test]
    fn test_drawer_without_detail_shows_placeholder_title() {
        let mut state = ViewState::default();
        state.select_meal("0");
        let mut cache = QueryCache::new();
        cache.complete(QueryKey::Lookup("0".into()), Fetched::Ready(Payload::Meal(None)));
        let drawer = Drawer::open(Instant::now(), Duration::from_millis(700));
        let scene = Scene {
            state: &state,
            cache: &cache,
            drawer: Some(&drawer),
        };
        let out = render(&scene, 80);
        assert!(out.contains("Recipe not found."));
        assert!(out.contains("│ Recipe"));
    }

    #[test]
    fn test_lookup_outcomes_are_distinct() {
        let meal: MealDetail =
            serde_json::from_str(r#"{"idMeal": "52959", "strMeal": "Baked salmon"}"#).unwrap();
        let found = render_lookup("52959", &Ok(Some(meal)), 80);
        assert_eq!(found[0], "Baked salmon");
        assert_eq!(found[1], "============");

        let missing = render_lookup("1", &Ok(None), 80);
        assert_eq!(missing, vec!["No recipe found for id 1".to_string()]);

        let down = render_lookup("1", &Err(BrowserError::StatusError(503)), 80);
        assert_eq!(down.len(), 1);
        assert!(down[0].starts_with("Recipe service unavailable"));
        assert!(!down[0].contains("No recipe found"));
    }
}
