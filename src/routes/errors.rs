use actix_web::http::header::ContentType;
use actix_web::HttpResponse;

pub const REQUEST_FAILED_MESSAGE: &str =
    "Something went wrong on our end. Please try again later.";
pub const MOUNTAIN_PROJECT_MESSAGE: &str =
    "An error occurred fetching data from the Mountain Project API. \
    Make sure you're using a valid, MP registered email address, \
    or try your request later.";
pub const NOT_FOUND_MESSAGE: &str =
    "The requested URL was not found on the server. \
    If you entered the URL manually please check your spelling and try again.";

pub fn render_error(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta http-equiv="content-type" content="text/html; charset=utf-8">
    <title>Mountain Project Visualizer: Error</title>
</head>
<body>
    <p>{}</p>
    <p><a href="/">&lt;- Back</a></p>
</body>
</html>
"#,
        htmlescape::encode_minimal(message)
    )
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type(ContentType::html())
        .body(render_error(NOT_FOUND_MESSAGE))
}
