/// Dark hCard theme, every rule scoped under `#{viewer_id}`.
pub fn default_stylesheet(viewer_id: &str) -> String {
    const RULES: &[&str] = &[
        ".content { margin: 0; padding: 0; }",
        ".navigation { margin: 0; padding: 0; }",
        ".vcard { margin: 10px; padding: 0; font-size: 11px; background: #333; color: #ccc; }",
        ".vcard a { text-decoration: none; color: #ccc; }",
        "a.fn, #{id} a.n { font: italic 40px/100% baskerville, times, serif; color: #eee; letter-spacing: .02em; margin: 0 0 10px; }",
        ".org { font-size: 22px; color: #aaa; margin: 10px 0 0 0; }",
        "a.email { font-size: 15px; color: #ddd; display: block; margin: 10px 0 10px; }",
        ".adr { float: right; font: normal normal 11px/120% arial, sans-serif; color: #aaa; margin: 0 0 0; width: 35%; }",
        ".adr span.country-name { display: block; text-transform: uppercase; margin: 0 0 5px; }",
        ".tel { font: normal normal 14px/100% baskerville, times, serif; color: #ddd; margin: 0 0 10px; }",
        ".navigation { font: normal normal 11px/100% arial, verdana, sans-serif; display: block; position: absolute; bottom: 0; height: 20px; width: 100%; background: #7e7e7e; padding: 5px 0 0; text-align: center; }",
        ".navigation a { color: #ccc; text-decoration: none; position: relative; top: 3px; margin: 0 5px; }",
    ];
    let mut sheet = String::new();
    for rule in RULES {
        sheet.push('#');
        sheet.push_str(viewer_id);
        sheet.push(' ');
        sheet.push_str(&rule.replace("{id}", viewer_id));
        sheet.push('\n');
    }
    sheet
}
