use maud::{html, Markup, DOCTYPE};

/// Top-level sections, used to highlight the current nav entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Campaigns,
    Search,
    Crm,
    Outreach,
    None,
}

const NAV: &[(Section, &str, &str)] = &[
    (Section::Dashboard, "/dashboard", "Dashboard"),
    (Section::Campaigns, "/campaigns", "Campaigns"),
    (Section::Search, "/search", "New Search"),
    (Section::Crm, "/crm", "CRM"),
    (Section::Outreach, "/outreach", "Outreach"),
];

pub fn desktop_layout(title: &str, section: Section, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Outreach Desk" }
                link rel="stylesheet" href="/static/main.css";
            }
            body {
              header class="flex items-center justify-between px-6 py-3 shadow" {
                  svg
                      xmlns="http://www.w3.org/2000/svg"
                      width="24"
                      height="24"
                      viewBox="0 0 24 24"
                      fill="none"
                      stroke="#524ed2"
                      stroke-width="2"
                      stroke-linecap="round"
                      stroke-linejoin="round"
                  {
                      path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                      path d="M3 7a2 2 0 0 1 2 -2h14a2 2 0 0 1 2 2v10a2 2 0 0 1 -2 2h-14a2 2 0 0 1 -2 -2v-10z" {}
                      path d="M3 7l9 6l9 -6" {}
                  }
                  h3 { "Outreach Desk" }
                  nav {
                      ul {
                          @for (s, href, label) in NAV {
                              li {
                                  a href=(href) class=[(*s == section).then_some("active")] { (label) }
                              }
                          }
                      }
                  }
              }
                main class="container" {
                    (content)
                }
            }
        }
    }
}
