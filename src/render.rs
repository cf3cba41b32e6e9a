//! HTML rendering for the sponsor showcase

use crate::data::{Sponsor, ROUND_CLASS};
use crate::escape::{esc_attr, esc_url};

/// Render the sponsor block for `login`
///
/// Every sponsor in `sponsors` is emitted in order, duplicates included.
/// When `add_styles` is set a `<style>` block with a flex layout follows the
/// markup.
pub fn render_sponsors(login: &str, sponsors: &[Sponsor], add_styles: bool) -> String {
    let id = esc_attr(login);
    let mut html = String::new();

    html.push_str(&format!("<div id=\"{id}-sponsors\">\n"));
    html.push_str(&format!("\t<div id=\"{id}-sponsors-logos\">\n"));
    for sponsor in sponsors {
        html.push_str(&render_sponsor(sponsor));
    }
    html.push_str("\t</div>\n");
    html.push_str("</div>\n");

    if add_styles {
        html.push_str(&render_styles(&id));
    }

    html
}

/// One anchor+image pair
fn render_sponsor(sponsor: &Sponsor) -> String {
    format!(
        "\t\t<a href=\"{href}\" target=\"_blank\" rel=\"nofollow\" class=\"{class}\">\n\t\t\t<img src=\"{src}\" alt=\"{alt}\">\n\t\t</a>\n",
        href = esc_url(&sponsor.url),
        class = esc_attr(&sponsor.css_classes),
        src = esc_url(&sponsor.image_url),
        alt = esc_attr(&sponsor.name),
    )
}

/// Companion style block; `id` must already be escaped
fn render_styles(id: &str) -> String {
    format!(
        "<style>\n\
         \t#{id}-sponsors {{ text-align: center; }}\n\
         \t#{id}-sponsors-logos {{ display: flex; }}\n\
         \t#{id}-sponsors-logos > a {{ padding: 0.25em; }}\n\
         \t#{id}-sponsors-logos > a img {{ width: auto; height: 2em; }}\n\
         \t#{id}-sponsors-logos > a.{ROUND_CLASS} img {{ border-radius: 50%; }}\n\
         </style>\n"
    )
}
