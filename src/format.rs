//! Markdown rendering of search results, match tags and the property card

use crate::model::{Lease, Priority, Property, SubLease};
use crate::search::{normalize, MatchSummary, SearchHit};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

/// Placeholder for missing values
pub const NOT_SPECIFIED: &str = "Non spécifié";

/// Message shown when a search selects nothing
pub const NO_RESULTS: &str = "Aucune propriété trouvée";

const INVALID_DATE: &str = "Date invalide";

const FREE_RENT: &str = "Gratuit";

const MONTHS: [&str; 12] = [
    "janvier", "février", "mars", "avril", "mai", "juin", "juillet", "août", "septembre",
    "octobre", "novembre", "décembre",
];

/// Render a date the way the property card shows it.
///
/// Empty input is "Non spécifié", `dd/mm/yyyy` passes through, ISO dates
/// become "15 décembre 2023" and anything else is "Date invalide".
pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return NOT_SPECIFIED.to_string();
    }
    if raw.contains('/') {
        return raw.to_string();
    }

    match parse_date(raw) {
        Some(date) => format!(
            "{} {} {}",
            date.day(),
            MONTHS[date.month0() as usize],
            date.year()
        ),
        None => INVALID_DATE.to_string(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Euro amount without decimals, digits grouped by three ("5 000 000 €")
pub fn format_price(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return NOT_SPECIFIED.to_string();
    }

    let rounded = value.round() as i64;
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{}{} €", sign, group_thousands(rounded.unsigned_abs()))
}

/// Annual rent of a legacy lease or sub-lease; zero is rent-free
pub fn format_rent(value: f64) -> String {
    if value == 0.0 {
        FREE_RENT.to_string()
    } else {
        format_price(value)
    }
}

/// Rent as written in a structured lease: amounts already carrying a
/// currency pass through, bare numbers are formatted as prices.
pub fn format_rent_text(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return NOT_SPECIFIED.to_string();
    }
    if raw == "0" {
        return FREE_RENT.to_string();
    }
    if raw.contains('€') {
        return raw.to_string();
    }
    match raw.replace(' ', "").parse::<f64>() {
        Ok(value) => format_price(value),
        Err(_) => raw.to_string(),
    }
}

/// Surface in square metres ("11 000 m²")
pub fn format_area(value: f64) -> String {
    if !value.is_finite() || value <= 0.0 {
        return NOT_SPECIFIED.to_string();
    }
    format!("{} m²", group_thousands(value.round() as u64))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    grouped
}

fn or_not_specified(value: &str) -> &str {
    if value.trim().is_empty() {
        NOT_SPECIFIED
    } else {
        value
    }
}

/// Wrap every occurrence of each query word in **bold**, ignoring case and accents.
///
/// Matching runs on folded text but the output keeps the original characters.
/// Overlapping and adjacent matches are merged into one bold run.
pub fn highlight(text: &str, query: &str) -> String {
    let terms: Vec<String> = query
        .split_whitespace()
        .map(normalize)
        .filter(|term| !term.is_empty())
        .collect();
    if terms.is_empty() {
        return text.to_string();
    }

    // (folded start, folded end, text start, text end) per grapheme
    let mut folded = String::with_capacity(text.len());
    let mut spans: Vec<(usize, usize, usize, usize)> = Vec::new();
    for (start, grapheme) in text.grapheme_indices(true) {
        let fold = normalize(grapheme);
        if fold.is_empty() {
            continue;
        }
        let folded_start = folded.len();
        folded.push_str(&fold);
        spans.push((folded_start, folded.len(), start, start + grapheme.len()));
    }

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for term in &terms {
        let mut idx = 0usize;
        while let Some(pos) = folded[idx..].find(term.as_str()) {
            let start = idx + pos;
            let end = start + term.len();
            let first = spans.iter().find(|span| span.1 > start);
            let last = spans.iter().rev().find(|span| span.0 < end);
            if let (Some(first), Some(last)) = (first, last) {
                ranges.push((first.2, last.3));
            }
            idx = end;
        }
    }

    if ranges.is_empty() {
        return text.to_string();
    }

    ranges.sort_by_key(|r| r.0);
    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (s, e) in ranges {
        match merged.last_mut() {
            Some(last) if s <= last.1 => last.1 = last.1.max(e),
            _ => merged.push((s, e)),
        }
    }

    let mut res = String::with_capacity(text.len() + merged.len() * 4);
    let mut last_idx = 0usize;
    for (s, e) in merged {
        res.push_str(&text[last_idx..s]);
        res.push_str("**");
        res.push_str(&text[s..e]);
        res.push_str("**");
        last_idx = e;
    }
    res.push_str(&text[last_idx..]);

    res
}

/// Tag line for a result list: "Ministère: Économie · Locataire: ... · +2 autres"
pub fn format_match_summary(summary: &MatchSummary) -> String {
    let mut parts: Vec<String> = summary
        .shown
        .iter()
        .map(|tag| format!("{}: {}", tag.label, tag.value))
        .collect();

    if summary.remaining > 0 {
        parts.push(format!("+{} autres", summary.remaining));
    }

    parts.join(" · ")
}

/// Result list as markdown
///
/// `total` counts every match, `hits` may be truncated to the display limit.
pub fn format_search_results(
    hits: &[SearchHit<'_>],
    total: usize,
    query: &str,
    summary: &MatchSummary,
) -> String {
    if hits.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut md = String::new();
    let noun = if total == 1 { "propriété" } else { "propriétés" };
    md.push_str(&format!("# Résultats · {} {}\n\n", total, noun));

    if hits.len() < total {
        md.push_str(&format!("{} affichées sur {}\n\n", hits.len(), total));
    }

    if !summary.shown.is_empty() {
        md.push_str(&format!("Correspondances: {}\n\n", format_match_summary(summary)));
    }

    for hit in hits {
        let property = hit.property;
        md.push_str(&format!(
            "## {} (#{})\n\n",
            highlight(&property.name, query),
            property.id
        ));
        md.push_str(&format!(
            "{} · {}\n",
            or_not_specified(&property.address),
            or_not_specified(&property.city)
        ));
        md.push_str(&format!(
            "{} · {} · {}\n\n",
            or_not_specified(&property.category_label),
            property.status.label(),
            or_not_specified(&property.ministry)
        ));

        for tag in &hit.matches {
            md.push_str(&format!("- {}: {}\n", tag.label, highlight(&tag.value, query)));
        }
        if !hit.matches.is_empty() {
            md.push('\n');
        }

        md.push_str("---\n\n");
    }

    md
}

/// Aggregated tags as a markdown list
pub fn format_tag_list(query: &str, summary: &MatchSummary) -> String {
    if summary.shown.is_empty() {
        return format!("Aucune correspondance pour « {} »", query);
    }

    let mut md = format!("# Correspondances · « {} »\n\n", query);
    for tag in &summary.shown {
        md.push_str(&format!("- {}: {}\n", tag.label, tag.value));
    }
    if summary.remaining > 0 {
        md.push_str(&format!("\n+{} autres\n", summary.remaining));
    }
    md
}

/// Headline figures of the property card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailStats {
    pub floor_area: f64,
    pub occupancy_percent: f64,
    pub active_leases: usize,
    pub active_projects: usize,
    pub urgent_tasks: usize,
    pub total_tasks: usize,
}

impl DetailStats {
    pub fn of(property: &Property) -> Self {
        Self {
            floor_area: property.floor_area,
            occupancy_percent: property.occupancy_percent(),
            active_leases: property.leases.iter().filter(|l| l.is_active()).count(),
            active_projects: property.projects.iter().filter(|p| p.active).count(),
            urgent_tasks: property
                .tasks
                .iter()
                .filter(|t| t.priority == Priority::High)
                .count(),
            total_tasks: property.tasks.len(),
        }
    }
}

/// Full property card as markdown
pub fn format_property_detail(property: &Property) -> String {
    let stats = DetailStats::of(property);
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", property.name));

    let mut badges = vec![
        property.status.label().to_string(),
        or_not_specified(&property.category_label).to_string(),
    ];
    if let Some(security) = property.security_level.label() {
        badges.push(security.to_string());
    }
    md.push_str(&format!("**{}**\n\n", badges.join(" · ")));

    md.push_str(&format!("{}\n", or_not_specified(&property.address)));
    md.push_str(&format!(
        "{} · {} · {}\n\n",
        or_not_specified(&property.city),
        or_not_specified(&property.department),
        or_not_specified(&property.region)
    ));
    md.push_str(&format!("Ministère: {}\n", or_not_specified(&property.ministry)));
    if let Some(phone) = &property.phone {
        md.push_str(&format!("Téléphone: {}\n", phone));
    }
    md.push_str(&format!("Valeur: {}\n\n", format_price(property.value)));

    md.push_str("## Statistiques\n\n");
    md.push_str(&format!("- Superficie: {}\n", format_area(stats.floor_area)));
    md.push_str(&format!(
        "- Occupation: {}% ({} / {})\n",
        stats.occupancy_percent, property.current_occupancy, property.max_capacity
    ));
    md.push_str(&format!("- Baux actifs: {}\n", stats.active_leases));
    md.push_str(&format!("- Projets actifs: {}\n", stats.active_projects));
    md.push_str(&format!("- Tâches urgentes: {}\n", stats.urgent_tasks));
    md.push_str(&format!("- Total tâches: {}\n\n", stats.total_tasks));

    if !property.description.is_empty() {
        md.push_str(&format!("{}\n\n", property.description));
    }

    if !property.facilities.is_empty() {
        md.push_str("## Installations\n\n");
        for facility in &property.facilities {
            md.push_str(&format!("- {}\n", facility));
        }
        md.push('\n');
    }

    md.push_str("## Baux\n\n");
    if property.leases.is_empty() {
        md.push_str("Aucun bail\n\n");
    }
    for lease in &property.leases {
        format_lease(&mut md, lease);
    }

    md.push_str("## Projets\n\n");
    if property.projects.is_empty() {
        md.push_str("Aucun projet\n\n");
    }
    for project in &property.projects {
        let state = if project.active { "Projet actif" } else { "Terminé" };
        md.push_str(&format!("### {} [{}]\n\n", project.name, state));
        md.push_str(&format!("- Responsable: {}\n", or_not_specified(&project.manager)));
        md.push_str(&format!("- Budget: {}\n", format_price(project.budget)));
        md.push_str(&format!(
            "- Période: {} - {}\n",
            format_date(&project.start_date),
            format_date(&project.end_date)
        ));
        md.push_str(&format!("- Avancement: {}%\n", project.progress_percent()));
        if !project.description.is_empty() {
            md.push_str(&format!("\n{}\n", project.description));
        }
        md.push('\n');
    }

    md.push_str("## Tâches\n\n");
    if property.tasks.is_empty() {
        md.push_str("Aucune tâche\n\n");
    }
    for task in &property.tasks {
        md.push_str(&format!("### {} [{}]\n\n", task.title, task.priority.label()));
        md.push_str(&format!("- Assigné à: {}\n", or_not_specified(&task.assignee)));
        md.push_str(&format!("- Échéance: {}\n", format_date(&task.due_date)));
        if !task.status.is_empty() {
            md.push_str(&format!("- Statut: {}\n", task.status));
        }
        if !task.category.is_empty() {
            md.push_str(&format!("- Catégorie: {}\n", task.category));
        }
        if !task.description.is_empty() {
            md.push_str(&format!("\n{}\n", task.description));
        }
        md.push('\n');
    }

    md
}

fn format_lease(md: &mut String, lease: &Lease) {
    md.push_str(&format!("### {} [{}]\n\n", lease.title(), lease.status().label()));
    md.push_str(&format!(
        "- Locataire: {}\n",
        lease.tenant().unwrap_or(NOT_SPECIFIED)
    ));

    match lease {
        Lease::Legacy(legacy) => {
            md.push_str(&format!("- Référence: {}\n", or_not_specified(&legacy.reference)));
            md.push_str(&format!("- Surface: {}\n", format_area(legacy.area)));
            md.push_str(&format!("- Loyer annuel: {}\n", format_rent(legacy.rent)));
            md.push_str(&format!(
                "- Période: {} - {}\n",
                format_date(&legacy.start_date),
                format_date(&legacy.end_date)
            ));
        }
        Lease::Structured(structured) => {
            let details = &structured.general.lease_details;
            let financial = &structured.general.financial_details;
            md.push_str(&format!("- Type: {}\n", or_not_specified(&details.kind)));
            md.push_str(&format!("- Usage: {}\n", or_not_specified(&details.primary_use)));
            md.push_str(&format!("- Année de base: {}\n", or_not_specified(&details.base_year)));
            md.push_str(&format!("- Loyer: {}\n", format_rent_text(&financial.rent)));
            md.push_str(&format!(
                "- Comptabilité: {}\n",
                or_not_specified(&financial.accounting_type)
            ));
            md.push_str(&format!(
                "- Paiement: {}\n",
                or_not_specified(&financial.payment_terms)
            ));
            md.push_str(&format!(
                "- Période: {} - {}\n",
                format_date(&structured.dates.start),
                format_date(&structured.dates.end)
            ));
            if !structured.dates.duration.is_empty() {
                md.push_str(&format!("- Durée: {}\n", structured.dates.duration));
            }
            if !structured.terms.security_requirements.is_empty() {
                md.push_str(&format!(
                    "- Exigences de sécurité: {}\n",
                    structured.terms.security_requirements.join(", ")
                ));
            }
            if !structured.metadata.last_updated.is_empty() {
                md.push_str(&format!(
                    "- Mis à jour: {}\n",
                    format_date(&structured.metadata.last_updated)
                ));
            }
        }
    }

    let sub_leases = lease.sub_leases();
    if !sub_leases.is_empty() {
        md.push_str("\nSous-bails:\n");
        for sub_lease in sub_leases {
            format_sub_lease(md, sub_lease);
        }
    }
    md.push('\n');
}

fn format_sub_lease(md: &mut String, sub_lease: &SubLease) {
    let state = if sub_lease.active { "Actif" } else { "Inactif" };
    let rent = format_rent(sub_lease.rent);
    md.push_str(&format!(
        "- {} ({}) [{}]: {}, {}, {} - {}",
        or_not_specified(&sub_lease.tenant),
        or_not_specified(&sub_lease.kind),
        state,
        rent,
        format_area(sub_lease.area),
        format_date(&sub_lease.start_date),
        format_date(&sub_lease.end_date)
    ));
    if let Some(rate) = sub_lease.occupancy_rate {
        md.push_str(&format!(", occupation {}%", rate));
    }
    md.push('\n');
}
