//! HTML rendering for every page.
//!
//! Views are plain functions from context to markup. They hold no logic
//! beyond choosing which tab is highlighted; all dynamic text is escaped.

use std::fmt::Write;

use crate::flash::Flash;
use crate::helpers::escape_html;
use crate::store::SimName;

/// Tabs shown on every per-simulation page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimPage {
    Home,
    Simulate,
    News,
    Stats,
    Rosters,
}

impl SimPage {
    pub const ALL: [SimPage; 5] = [
        SimPage::Home,
        SimPage::Simulate,
        SimPage::News,
        SimPage::Stats,
        SimPage::Rosters,
    ];

    /// Identifier used for the active tab
    pub fn slug(self) -> &'static str {
        match self {
            SimPage::Home => "home",
            SimPage::Simulate => "simulate",
            SimPage::News => "news",
            SimPage::Stats => "stats",
            SimPage::Rosters => "rosters",
        }
    }

    /// Label shown on the tab
    pub fn title(self) -> &'static str {
        match self {
            SimPage::Home => "Home",
            SimPage::Simulate => "Simulate",
            SimPage::News => "News",
            SimPage::Stats => "Stats",
            SimPage::Rosters => "Rosters",
        }
    }

    /// Link target for this tab of simulation `name`
    pub fn href(self, name: &str) -> String {
        match self {
            SimPage::Home => format!("/play_sim/{name}"),
            page => format!("/play_sim/{name}/{}", page.slug()),
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            SimPage::Home => "Welcome back. Pick a section above to continue.",
            SimPage::Simulate => "Simulation controls are coming soon.",
            SimPage::News => "No news yet.",
            SimPage::Stats => "Stats tables are coming soon.",
            SimPage::Rosters => "Rosters are coming soon.",
        }
    }
}

/// Context for a per-simulation page
#[derive(Debug, Clone, Copy)]
pub struct SimContext<'a> {
    pub name: &'a str,
    pub current_date: &'a str,
    pub active_page: SimPage,
}

fn layout(title: &str, flashes: &[Flash], body: &str) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width,initial-scale=1\">\n\
         <title>{}</title>\n\
         <link rel=\"stylesheet\" href=\"/static/style.css\">\n\
         </head>\n\
         <body>\n\
         <nav class=\"site-nav\"><a href=\"/\">Home</a> <a href=\"/play\">Play</a> \
         <a href=\"/about\">About</a></nav>\n",
        escape_html(title)
    );

    if !flashes.is_empty() {
        html.push_str("<ul class=\"flashes\">\n");
        for flash in flashes {
            let _ = writeln!(
                html,
                "<li class=\"flash flash-{}\">{}</li>",
                flash.level.as_str(),
                escape_html(&flash.message)
            );
        }
        html.push_str("</ul>\n");
    }

    let _ = write!(html, "<main>\n{body}</main>\n</body>\n</html>\n");
    html
}

/// Landing page
pub fn index_page(flashes: &[Flash]) -> String {
    layout(
        "Simulation Manager",
        flashes,
        "<h1>Simulation Manager</h1>\n\
         <p>Create a simulation and jump in.</p>\n\
         <p><a class=\"button\" href=\"/play\">Play</a></p>\n",
    )
}

/// Simulation list with the create form
pub fn play_page(simulations: &[String], flashes: &[Flash]) -> String {
    let mut body = String::from(
        "<h1>Simulations</h1>\n\
         <form method=\"post\" action=\"/create_sim\" class=\"create-sim\">\n\
         <input type=\"text\" name=\"sim_name\" placeholder=\"Simulation name\" \
         pattern=\"[A-Za-z0-9_\\-]+\" maxlength=\"64\" required>\n\
         <button type=\"submit\">Create</button>\n\
         </form>\n",
    );

    if simulations.is_empty() {
        body.push_str("<p class=\"empty\">No simulations yet.</p>\n");
    } else {
        body.push_str("<ul class=\"simulations\">\n");
        for name in simulations {
            // Only valid single-segment names get action links.
            let linkable = SimName::parse(name).is_ok();
            let name = escape_html(name);
            if linkable {
                let _ = writeln!(
                    body,
                    "<li><span class=\"sim-name\">{name}</span> \
                     <a href=\"/play_sim/{name}\">Open</a> \
                     <a class=\"danger\" href=\"/delete_sim/{name}\">Delete</a></li>"
                );
            } else {
                let _ = writeln!(
                    body,
                    "<li class=\"unmanaged\"><span class=\"sim-name\">{name}</span> \
                     <span class=\"note\">unsupported name</span></li>"
                );
            }
        }
        body.push_str("</ul>\n");
    }

    layout("Simulations", flashes, &body)
}

/// One tab of a simulation
pub fn sim_page(ctx: SimContext<'_>, flashes: &[Flash]) -> String {
    let name = escape_html(ctx.name);
    let mut body = String::new();
    let _ = writeln!(
        body,
        "<header class=\"sim-header\"><h1>{name}</h1>\
         <span class=\"current-date\">{}</span></header>",
        escape_html(ctx.current_date)
    );

    body.push_str("<nav class=\"sim-tabs\">\n");
    for page in SimPage::ALL {
        let class = if page == ctx.active_page {
            " class=\"active\""
        } else {
            ""
        };
        let _ = writeln!(
            body,
            "<a href=\"{}\"{class}>{}</a>",
            page.href(&name),
            page.title()
        );
    }
    body.push_str("</nav>\n");

    let _ = writeln!(
        body,
        "<section class=\"sim-{}\"><h2>{}</h2><p>{}</p></section>",
        ctx.active_page.slug(),
        ctx.active_page.title(),
        ctx.active_page.placeholder()
    );

    layout(
        &format!("{} - {}", ctx.name, ctx.active_page.title()),
        flashes,
        &body,
    )
}
