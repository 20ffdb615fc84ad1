// Report data handed to the renderers, and the renderers themselves.

use crate::aggregator::SiteAvailability;
use crate::compactor::ReservableRange;
use crate::counter::SiteCounts;
use crate::dates::{format_iso, format_long, DateWindow};
use crate::recreation::{campground_url, campsite_url};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde::Serialize;
use std::fmt::Display;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Markup error: {0}")]
    MarkupError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Encoding error: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Html,
    Json,
    Text,
}

/// One campground's results, with everything a renderer needs already
/// resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParkReport {
    pub park_id: String,
    pub park_name: String,
    pub total_sites_count: usize,
    pub available_sites_count: usize,
    pub available_sites: Vec<AvailableSite>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailableSite {
    pub site_id: String,
    pub site: String,
    #[serde(rename = "loop")]
    pub loop_name: String,
    pub max_num_people: String,
    pub capacity_rating: String,
    pub campsite_type: String,
    pub ranges: Vec<ReservableRange>,
}

impl ParkReport {
    /// Pair each qualifying site with its metadata, ordered by loop
    /// (case-insensitive) then site label.
    pub fn new(
        park_id: &str,
        park_name: String,
        sites: &SiteAvailability,
        counts: SiteCounts,
    ) -> Self {
        let mut available_sites: Vec<AvailableSite> = counts
            .ranges_by_site
            .into_iter()
            .map(|(site_id, ranges)| {
                let metadata = sites
                    .get(&site_id)
                    .map(|entry| entry.metadata.clone())
                    .unwrap_or_default();
                AvailableSite {
                    site: metadata.site_label().to_string(),
                    loop_name: metadata.loop_label().to_string(),
                    max_num_people: metadata.max_people_label(),
                    capacity_rating: metadata.capacity_label().to_string(),
                    campsite_type: metadata.type_label().to_string(),
                    site_id,
                    ranges,
                }
            })
            .collect();

        available_sites.sort_by(|a, b| {
            a.loop_name
                .to_lowercase()
                .cmp(&b.loop_name.to_lowercase())
                .then_with(|| a.site.cmp(&b.site))
        });

        Self {
            park_id: park_id.to_string(),
            park_name,
            total_sites_count: counts.maximum,
            available_sites_count: counts.current,
            available_sites,
        }
    }
}

/// Order campgrounds by name, ignoring case.
pub fn sort_parks(reports: &mut [ParkReport]) {
    reports.sort_by(|a, b| {
        a.park_name
            .to_lowercase()
            .cmp(&b.park_name.to_lowercase())
            .then_with(|| a.park_id.cmp(&b.park_id))
    });
}

pub fn has_availability(reports: &[ParkReport]) -> bool {
    reports.iter().any(|park| park.available_sites_count > 0)
}

pub fn render(
    format: OutputFormat,
    reports: &[ParkReport],
    window: &DateWindow,
) -> Result<String, RenderError> {
    match format {
        OutputFormat::Html => render_html(reports, window),
        OutputFormat::Json => render_json(reports),
        OutputFormat::Text => Ok(render_text(reports, window)),
    }
}

pub fn render_json(reports: &[ParkReport]) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(reports)?)
}

pub fn render_html(reports: &[ParkReport], window: &DateWindow) -> Result<String, RenderError> {
    let mut writer = Writer::new(Vec::new());

    start(&mut writer, "html")?;
    start(&mut writer, "head")?;
    end(&mut writer, "head")?;
    start(&mut writer, "body")?;

    text(
        &mut writer,
        &format!(
            "Campsites for {} to {}",
            format_long(window.start()),
            format_long(window.end())
        ),
    )?;
    line_break(&mut writer)?;

    for park in reports {
        start(&mut writer, "p")?;
        text(&mut writer, &format!("{} ", park.park_name))?;
        link(&mut writer, &campground_url(&park.park_id), "recreation.gov")?;
        line_break(&mut writer)?;
        text(
            &mut writer,
            &format!(
                "{} sites available out of {}",
                park.available_sites_count, park.total_sites_count
            ),
        )?;
        line_break(&mut writer)?;

        for site in &park.available_sites {
            link(&mut writer, &campsite_url(&site.site_id), &site.site_id)?;
            text(
                &mut writer,
                &format!(
                    " site={} {}, max people={}, capacity={}, type={}",
                    site.loop_name,
                    site.site,
                    site.max_num_people,
                    site.capacity_rating,
                    site.campsite_type
                ),
            )?;
            if !site.ranges.is_empty() {
                text(&mut writer, &format!(", dates: {}", join(&site.ranges, ", ")))?;
            }
            line_break(&mut writer)?;
        }

        end(&mut writer, "p")?;
    }

    end(&mut writer, "body")?;
    end(&mut writer, "html")?;

    Ok(String::from_utf8(writer.into_inner())?)
}

/// Plain-text summary for terminals and notifications.
pub fn render_text(reports: &[ParkReport], window: &DateWindow) -> String {
    let mut lines = Vec::new();

    if has_availability(reports) {
        lines.push(format!(
            "There are campsites available from {} to {}!!!",
            format_iso(window.start()),
            format_iso(window.end())
        ));
    } else {
        lines.push("There are no campsites available :(".to_string());
    }

    for park in reports {
        let emoji = if park.available_sites_count > 0 {
            "✅"
        } else {
            "❌"
        };
        lines.push(format!(
            "{} {} ({}): {} site(s) available out of {} site(s)",
            emoji,
            park.park_name,
            park.park_id,
            park.available_sites_count,
            park.total_sites_count
        ));

        for site in &park.available_sites {
            lines.push(format!(
                "  * Site {} ({} {}) is available on the following dates:",
                site.site_id, site.loop_name, site.site
            ));
            lines.extend(site.ranges.iter().map(|range| format!("    * {}", range)));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn join<T: Display>(items: &[T], separator: &str) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(separator)
}

fn markup<E: Display>(err: E) -> RenderError {
    RenderError::MarkupError(err.to_string())
}

fn start(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<(), RenderError> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(markup)
}

fn end(writer: &mut Writer<Vec<u8>>, name: &str) -> Result<(), RenderError> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(markup)
}

fn text(writer: &mut Writer<Vec<u8>>, content: &str) -> Result<(), RenderError> {
    writer
        .write_event(Event::Text(BytesText::new(content)))
        .map_err(markup)
}

fn line_break(writer: &mut Writer<Vec<u8>>) -> Result<(), RenderError> {
    writer
        .write_event(Event::Empty(BytesStart::new("br")))
        .map_err(markup)
}

fn link(writer: &mut Writer<Vec<u8>>, href: &str, label: &str) -> Result<(), RenderError> {
    let anchor = BytesStart::new("a").with_attributes([("href", href), ("target", "_blank")]);
    writer.write_event(Event::Start(anchor)).map_err(markup)?;
    text(writer, label)?;
    end(writer, "a")
}
