//! The single HTML page served by every form route.
//!
//! Two forms posting to `/convert` and `/reverse`, plus a `Result:` pane.
//! There is exactly one interpolation point, so rendering is a plain
//! string substitution with the result HTML-escaped.

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>Emoji Converter</title>
    <style>
        body {
            font-family: sans-serif;
            background: #f4f4f9;
            display: flex;
            justify-content: center;
            margin: 0;
            padding-top: 40px;
        }
        .container {
            background: #ffffff;
            padding: 24px;
            border-radius: 8px;
            box-shadow: 0 2px 6px rgba(0, 0, 0, 0.1);
            width: 420px;
            text-align: center;
        }
        form {
            margin-bottom: 16px;
        }
        textarea {
            width: 100%;
            padding: 8px;
            border-radius: 4px;
            border: 1px solid #cccccc;
            box-sizing: border-box;
        }
        input[type="submit"] {
            margin-top: 8px;
            background-color: #1e90ff;
            color: white;
            border: none;
            padding: 8px 16px;
            border-radius: 4px;
            cursor: pointer;
        }
        pre {
            background-color: #f0f4f8;
            padding: 10px;
            border-radius: 4px;
            border: 1px solid #cccccc;
            text-align: left;
            white-space: pre-wrap;
            word-break: break-all;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>Emoji Converter</h1>
        <form method="POST" action="/convert">
            <textarea name="text" rows="4" placeholder="Enter text with emojis..."></textarea>
            <input type="submit" value="Convert to Codes">
        </form>
        <form method="POST" action="/reverse">
            <textarea name="text" rows="4" placeholder="Enter text with codes like \U+1F600..."></textarea>
            <input type="submit" value="Convert to Emojis">
        </form>
        <h2>Result:</h2>
        <pre>{result}</pre>
    </div>
</body>
</html>
"#;

/// Render the page with `result` in the `Result:` pane.
pub fn render(result: &str) -> String {
    TEMPLATE.replace("{result}", &html_escape::encode_text(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_both_forms() {
        let html = render("");
        assert!(html.contains(r#"action="/convert""#));
        assert!(html.contains(r#"action="/reverse""#));
        assert!(html.contains("<pre></pre>"));
    }

    #[test]
    fn interpolates_the_result() {
        let html = render("\\U+1F600 ");
        assert!(html.contains("<pre>\\U+1F600 </pre>"));
    }

    #[test]
    fn escapes_html_in_the_result() {
        let html = render("<script>alert(1)</script>");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
