//! Print safety — pins the document to one physical page when printed.
//!
//! Browser print dialogs paginate freely: a template that looks like one
//! page on screen can spill a few lines onto a second sheet. This stage
//! appends a `@media print` block that fixes the page height on the
//! top-level content container (and the usual two-column wrappers), clips
//! anything beyond it, and forces background colors to print as rendered.
//!
//! Pure insertion before the closing `</style>` tag; existing rules are
//! never modified.

use crate::template::transforms::{append_css, Transform};

pub struct PrintSafety;

/// US letter. The container height leaves the body padding inside the page.
const PRINT_CSS: &str = "\
@media print {
  html, body {
    width: 8.5in;
    margin: 0;
    -webkit-print-color-adjust: exact;
    print-color-adjust: exact;
  }
  body {
    height: 11in;
    overflow: hidden;
  }
  .resume-container, .container, .page, .resume, .template-root {
    max-height: 11in;
    overflow: hidden;
    page-break-after: avoid;
  }
  .two-column, .columns, .main-grid, .layout-grid, .content-grid {
    max-height: 10in;
    overflow: hidden;
  }
}";

impl Transform for PrintSafety {
    fn name(&self) -> &'static str {
        "print-safety"
    }

    fn apply(&self, html: &str) -> String {
        append_css(html, PRINT_CSS)
    }
}
