use std::fmt::Write;

use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::anyhow;

use crate::domain::{EmailAddress, Units};
use crate::guard::{FormGuard, Verdict};
use crate::mountain_project::{
    Climber, MountainProjectClient, MountainProjectError,
};
use crate::page::Page;
use crate::routes::{
    error_chain_fmt, render_error, render_index, section_toggle,
    MOUNTAIN_PROJECT_MESSAGE, REQUEST_FAILED_MESSAGE,
};
use crate::startup::TestAccount;
use crate::ticks::{thousands, TickSummary};

#[derive(serde::Deserialize)]
pub struct FormData {
    #[serde(default)]
    email: String,
    #[serde(default)]
    units: String,
    #[serde(default)]
    test: String,
}

#[derive(thiserror::Error)]
pub enum DataError {
    #[error("could not reach mountain project")]
    Request(#[source] MountainProjectError),

    #[error("mountain project did not return usable data")]
    MountainProject(#[source] MountainProjectError),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<MountainProjectError> for DataError {
    fn from(e: MountainProjectError) -> Self {
        match e {
            MountainProjectError::Request(_) => DataError::Request(e),
            _ => DataError::MountainProject(e),
        }
    }
}

impl std::fmt::Debug for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl DataError {
    /// Message shown to the visitor. Details stay in the logs.
    pub fn public_message(&self) -> &'static str {
        match self {
            DataError::Request(_) | DataError::Unexpected(_) => {
                REQUEST_FAILED_MESSAGE
            }
            DataError::MountainProject(_) => MOUNTAIN_PROJECT_MESSAGE,
        }
    }
}

impl ResponseError for DataError {
    fn status_code(&self) -> StatusCode {
        match self {
            DataError::Request(_) => StatusCode::BAD_REQUEST,
            DataError::MountainProject(_) => StatusCode::FORBIDDEN,
            DataError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::html())
            .body(render_error(self.public_message()))
    }
}

#[tracing::instrument(
    name = "visualize ticks",
    skip(form, form_guard, mp_client, test_account),
    fields(test_account = form.test == "yes", units = %form.units)
)]
pub async fn data(
    form: web::Form<FormData>,
    form_guard: web::Data<FormGuard>,
    mp_client: web::Data<MountainProjectClient>,
    test_account: web::Data<TestAccount>,
) -> Result<HttpResponse, DataError> {
    let form = form.into_inner();

    let (email, units) = if form.test == "yes" {
        let email = EmailAddress::parse(test_account.0.clone())
            .map_err(|e| anyhow!(e))?;
        (email, Units::Feet)
    } else {
        let verdict = form_guard.check(&form.email);
        match verdict {
            Verdict::Accepted(email) => (email, Units::parse(&form.units)),
            verdict => {
                tracing::info!(?verdict, "rejected the submitted email");
                let mut page = Page::new()
                    .with_value(&form_guard.ids().input_id, form.email);
                form_guard.apply(&verdict, &mut page);
                section_toggle(None).apply_all(&mut page);

                return Ok(HttpResponse::BadRequest()
                    .content_type(ContentType::html())
                    .body(render_index(&page)));
            }
        }
    };

    let climber = mp_client.get_user(&email).await?;
    let ticks = mp_client.tick_export(&climber).await?;
    tracing::info!(ticks = ticks.len(), "fetched the tick list");

    let summary = TickSummary::from_ticks(&ticks, units);

    Ok(HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(render_data(&climber, &summary)))
}

pub fn render_data(climber: &Climber, summary: &TickSummary) -> String {
    let units = summary.units.label();

    let mut rows = String::new();
    for (year, stats) in &summary.years {
        writeln!(
            rows,
            "        <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            year,
            thousands(summary.height_in_units(stats)),
            stats.routes,
            stats.pitches,
            stats.problems,
        )
        .expect("writing to a String cannot fail");
    }
    if rows.is_empty() {
        rows.push_str("        <tr><td colspan=\"5\">No ticks yet.</td></tr>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8">
    <title>Mountain Project Visualizer: {username}</title>
</head>
<body>
    <h1>{username}</h1>
    <p>Total height climbed: {total_height} {units}</p>
    <p>Total pitches climbed: {total_pitches}</p>
    <table>
        <tr><th>Year</th><th>Height ({units})</th><th>Routes</th><th>Pitches</th><th>Problems</th></tr>
{rows}    </table>
{grades}    <p><a href="/">&lt;- Back</a></p>
</body>
</html>
"#,
        username = htmlescape::encode_minimal(&climber.name),
        total_height = thousands(summary.total_height()),
        total_pitches = thousands(summary.total_pitches),
        grades = render_grades(summary),
    )
}

/// One table per route type with the grades ticked each year.
fn render_grades(summary: &TickSummary) -> String {
    let mut tables = String::new();
    for (route_type, years) in &summary.grades {
        let route_type = htmlescape::encode_minimal(route_type);
        writeln!(
            tables,
            "    <h2>{} grades by year</h2>\n    <table>\n        \
             <tr><th>Year</th><th>Grades ticked</th><th>Most ticked</th><th>Median</th></tr>",
            route_type
        )
        .expect("writing to a String cannot fail");

        for (year, grade_year) in years {
            let ticked = grade_year
                .counts
                .iter()
                .map(|(grade, n)| {
                    format!("{} ({})", htmlescape::encode_minimal(&grade.rating), n)
                })
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(
                tables,
                "        <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                year,
                ticked,
                htmlescape::encode_minimal(&grade_year.most_ticked.rating),
                htmlescape::encode_minimal(&grade_year.median.rating),
            )
            .expect("writing to a String cannot fail");
        }
        tables.push_str("    </table>\n");
    }
    tables
}
