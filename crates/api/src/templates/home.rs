use maud::{html, Markup, DOCTYPE};

/// Routes listed on the landing page, in the order they are shown
pub const API_ROUTES: &[&str] = &[
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/<start>",
    "/api/v1.0/<start>/<end>",
];

pub fn home_page(api_base: &str) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { "Climate Observation API" }
            }
            body {
                "Available Routes:"
                br;
                @for route in API_ROUTES {
                    (route)
                    br;
                }
                p {
                    "Dates are YYYY-MM-DD. API docs: "
                    a href=(format!("{}/docs", api_base.trim_end_matches('/'))) { "/docs" }
                }
            }
        }
    }
}
