//! Documentation page served at `GET /`.

use axum::response::Html;

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>image-gateway</title>
</head>
<body>
  <h1>image-gateway</h1>
  <p>Fetches a remote image, resizes it and returns it in its original format.</p>
  <h2>Usage</h2>
  <pre>GET /img?url=&lt;image url&gt;&amp;size=&lt;size&gt;</pre>
  <h2>Sizes</h2>
  <ul>
    <li><code>200x100</code> fit inside 200&times;100, keeping the aspect ratio</li>
    <li><code>200x100!</code> exactly 200&times;100</li>
    <li><code>50%</code> half the original width and height</li>
  </ul>
  <p>Remember to URL-encode the parameters (<code>%</code> is <code>%25</code>, <code>!</code> is <code>%21</code>).</p>
  <h2>Formats</h2>
  <p>GIF, JPEG and PNG. The response <code>X-Image-Timings</code> header reports
  fetch and resize durations.</p>
  <h2>Errors</h2>
  <ul>
    <li><code>401</code> missing <code>url</code> or <code>size</code></li>
    <li><code>400</code> the image could not be fetched or read</li>
    <li><code>501</code> unrecognized format, or decoding, resizing or encoding failed</li>
  </ul>
</body>
</html>
"#;

pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_PAGE)
}
