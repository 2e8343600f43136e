use crate::domain::campaign::{COUNTRIES, DEFAULT_QUANTITY, MAX_QUANTITY, PLATFORMS};
use crate::templates::components::notice;
use crate::templates::{desktop_layout, Section};
use maud::{html, Markup};

/// Campaign configuration form. `error` is shown when a previous submit was rejected.
pub fn search_page(error: Option<&str>) -> Markup {
    desktop_layout(
        "New Search",
        Section::Search,
        html! {
            h1 { "Lead Search" }
            p { "Configure a campaign. The automation picks it up as soon as it is saved." }

            @if let Some(error) = error {
                (notice("error", error))
            }

            form method="post" action="/campaigns" class="card" {
                label for="campaign_name" { "Campaign name" }
                input type="text" id="campaign_name" name="campaign_name" placeholder="e.g., Summer Outreach 2026" required;

                label for="niches" { "Target niches (comma separated)" }
                input type="text" id="niches" name="niches" placeholder="islamic fashion, modest wear" required;

                label for="keywords" { "Keywords (comma separated)" }
                input type="text" id="keywords" name="keywords" placeholder="abaya, thobe, hijab" required;

                // Repeated keys (platforms=...&platforms=...) carry the multi-selects.
                fieldset {
                    legend { "Platforms" }
                    @for (value, label) in PLATFORMS {
                        label { input type="checkbox" name="platforms" value=(value); " " (label) }
                    }
                }

                label for="countries" { "Countries" }
                select id="countries" name="countries" multiple size="8" required {
                    @for country in COUNTRIES {
                        option value=(country) { (country) }
                    }
                }

                label for="quantity" { "Leads to find" }
                input type="number" id="quantity" name="quantity" min="1" max=(MAX_QUANTITY) value=(DEFAULT_QUANTITY);

                button type="submit" class="btn primary" { "Start Campaign" }
            }
        },
    )
}
