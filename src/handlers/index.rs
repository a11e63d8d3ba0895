use axum::response::Html;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>SQL Injection Lab</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; background: #f5f5f5; }
        .container { max-width: 1100px; margin: 0 auto; background: white; padding: 30px; border-radius: 10px; }
        h1 { color: #2c3e50; text-align: center; }
        h2 { color: #e74c3c; border-bottom: 2px solid #e74c3c; padding-bottom: 5px; }
        .danger { background: #ffebee; border-left: 4px solid #f44336; padding: 15px; margin: 20px 0; }
        .safe { background: #e8f5e8; border-left: 4px solid #4caf50; padding: 15px; margin: 20px 0; }
        .info { background: #e3f2fd; border-left: 4px solid #2196f3; padding: 15px; margin: 20px 0; }
        .link { display: inline-block; margin: 10px; padding: 10px 20px; background: #3498db; color: white; text-decoration: none; border-radius: 5px; }
        .vuln { background: #e74c3c; }
        pre { background: #f8f9fa; padding: 15px; border-radius: 5px; overflow-x: auto; }
    </style>
</head>
<body>
<div class="container">
    <h1>SQL Injection Lab</h1>
    <div class="info">
        <p>Two login endpoints over the same SQLite store: one builds its query by pasting input
        into the SQL text, the other binds input as parameters. Suspicious input is recorded in
        the attack log.</p>
    </div>

    <h2>Endpoints</h2>
    <div class="danger">
        <h3>Vulnerable: /login_vuln</h3>
        <a href="/login_vuln?username=admin&password=wrong" class="link vuln">Normal login</a>
        <a href="/login_vuln?username=admin'--&password=any" class="link vuln">Comment bypass</a>
        <pre>Sample payloads:
username: admin'--
username: ' UNION SELECT id,username,password,role,created_at FROM users--
username: admin' AND 1=1--</pre>
    </div>
    <div class="safe">
        <h3>Hardened: /login_safe</h3>
        <a href="/login_safe?username=admin&password=admin123" class="link">Normal login</a>
        <a href="/login_safe?username=admin'--&password=any" class="link">Same payload</a>
    </div>

    <h2>Automated testing</h2>
    <pre>sqlmap -u "http://127.0.0.1:5000/login_vuln?username=test&password=test" --batch --dump
sqlmap -u "http://127.0.0.1:5000/login_safe?username=test&password=test" --batch</pre>

    <h2>More</h2>
    <a href="/setup" class="link">Initialize database</a>
    <a href="/stats" class="link">Attack statistics</a>
    <a href="/users" class="link">User list</a>
    <a href="/advanced_vuln?search=adm" class="link vuln">Vulnerable search</a>

    <div class="danger">
        <p><strong>For education and research only.</strong> Do not point these techniques at
        systems you are not authorized to test.</p>
    </div>
</div>
</body>
</html>
"#;

/// GET / -> landing page with sample payload links.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
