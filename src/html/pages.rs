use super::escape::push_escaped;
use crate::models::captured::CapturedRequest;
use crate::utils::time::display_timestamp;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write;

/// Pretty JSON for display; strings are shown as-is rather than quoted
fn pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

fn pretty_body(body: &Value) -> String {
    match body {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => pretty(other),
    }
}

/// Page echoing a single request back to the caller
pub fn render_request_page<Q: Serialize, H: Serialize>(
    method: &str,
    query: &Q,
    headers: &H,
    body: &Value,
) -> String {
    let mut buf = String::with_capacity(2048);

    buf.push_str(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>Request viewer</title>\n\
         <style>body{font-family:system-ui,Segoe UI,Roboto,Arial;margin:20px}\
         pre{background:#f5f5f5;padding:12px;border-radius:6px}</style>\n\
         </head>\n<body>\n  <h1>Request viewer</h1>\n  <p><strong>Method:</strong> ",
    );
    push_escaped(&mut buf, method);
    buf.push_str("</p>\n  <h2>Query</h2><pre>");
    push_escaped(&mut buf, &pretty(query));
    buf.push_str("</pre>\n  <h2>Headers</h2><pre>");
    push_escaped(&mut buf, &pretty(headers));
    buf.push_str("</pre>\n  <h2>Body</h2><pre>");
    push_escaped(&mut buf, &pretty_body(body));
    buf.push_str(
        "</pre>\n  <hr>\n  <p>Tip: use <code>curl</code>, Postman or an HTML form to hit this URL.</p>\n\
         </body>\n</html>",
    );

    buf
}

const VIEWER_STYLE: &str = "\
body { font-family: Arial, sans-serif; margin: 20px; background: #f5f5f5; }
.container { max-width: 1200px; margin: 0 auto; background: white; padding: 20px; border-radius: 10px; }
.header { text-align: center; margin-bottom: 30px; }
.stats { background: #e3f2fd; padding: 15px; border-radius: 5px; margin-bottom: 20px; }
.request { border: 1px solid #ddd; margin: 15px 0; padding: 15px; border-radius: 5px; background: #fafafa; }
.request-header { background: #007cba; color: white; padding: 10px; margin: -15px -15px 15px -15px; border-radius: 5px 5px 0 0; }
.request-id { font-weight: bold; }
.timestamp { color: #eee; font-size: 0.9em; margin-left: 10px; }
.body { background: #f8f9fa; padding: 10px; border-radius: 3px; margin-top: 10px; }
.empty { text-align: center; color: #666; padding: 40px; }
.clear-btn { background: #dc3545; color: white; padding: 10px 20px; border: none; border-radius: 5px; cursor: pointer; margin: 10px; }
.clear-btn:hover { background: #c82333; }
pre { white-space: pre-wrap; word-wrap: break-word; }";

const VIEWER_SCRIPT: &str = "\
function clearRequests() {
    if (confirm('Are you sure you want to clear all requests?')) {
        fetch('/api/clear', { method: 'POST' }).then(() => location.reload());
    }
}";

/// Listing of captured requests. `requests` is rendered in the order given.
pub fn render_viewer_page(requests: &[CapturedRequest]) -> String {
    let mut buf = String::with_capacity(4096 + requests.len() * 1024);

    let _ = write!(
        buf,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>POST Request Viewer</title>\n\
         <style>\n{}\n</style>\n</head>\n<body>\n<div class=\"container\">\n\
         <div class=\"header\">\n<h1>POST Request Viewer</h1>\n\
         <p>Simple API to capture and view POST requests</p>\n</div>\n\
         <div class=\"stats\">\n<strong>Total Requests: {}</strong>\n",
        VIEWER_STYLE,
        requests.len()
    );

    if requests.is_empty() {
        buf.push_str(
            "</div>\n<div class=\"empty\"><h3>No POST requests yet</h3>\
             <p>Send a POST request to this endpoint to see it here!</p></div>\n",
        );
    } else {
        buf.push_str(
            "<button class=\"clear-btn\" onclick=\"clearRequests()\">Clear All</button>\n</div>\n",
        );

        for request in requests {
            let _ = write!(
                buf,
                "<div class=\"request\">\n<div class=\"request-header\">\n\
                 <span class=\"request-id\">Request #{}</span>\n<span class=\"timestamp\">",
                request.id
            );
            push_escaped(&mut buf, &display_timestamp(&request.timestamp));
            buf.push_str("</span>\n</div>\n<h4>Body:</h4>\n<div class=\"body\"><pre>");
            push_escaped(&mut buf, &pretty(&request.body));
            buf.push_str(
                "</pre></div>\n<details>\n<summary>Show Headers</summary>\n<div class=\"body\"><pre>",
            );
            push_escaped(&mut buf, &pretty(&request.headers));
            buf.push_str("</pre></div>\n</details>\n</div>\n");
        }
    }

    let _ = write!(
        buf,
        "</div>\n<script>\n{}\n</script>\n</body>\n</html>",
        VIEWER_SCRIPT
    );

    buf
}
