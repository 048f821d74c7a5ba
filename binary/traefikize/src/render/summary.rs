use traefikize_convert::{AnnotationStatus, GlobalReport, IngressReport, Summary};

const SEPARATOR_WIDTH: usize = 80;

/// Render the migration report for a single Ingress.
pub fn print_ingress_report(report: &IngressReport) {
    print_section(&format!("INGRESS: {}/{}", report.namespace, report.name));

    for entry in &report.entries {
        let message = entry.message.as_deref().unwrap_or("-");
        match entry.status {
            AnnotationStatus::Converted => println!("  ✅ {}", entry.annotation),
            AnnotationStatus::Warned => println!("  ⚠️  {}\n      → {}", entry.annotation, message),
            AnnotationStatus::Skipped => println!("  ❌ {}\n      → {}", entry.annotation, message),
            AnnotationStatus::Ignored => println!("  ℹ️  {}", entry.annotation),
        }
    }
    println!();

    print_subsection("SUMMARY");
    print_summary(&format!("Summary for {}/{}", report.namespace, report.name), Summary::of(&report.entries));
}

/// Render the aggregated summary across all Ingresses.
pub fn print_global_summary(global: &GlobalReport) {
    print_section("GLOBAL SUMMARY");
    print_summary("Global Summary", global.summary());
}

fn print_summary(title: &str, summary: Summary) {
    println!("{}", title);
    println!("Converted: {}", summary.converted);
    println!("Warnings:  {}", summary.warnings);
    println!("Skipped:   {}", summary.skipped);
    println!("Ignored:   {}", summary.ignored);
    println!("Result:    {}", summary.verdict());
    println!();
}

fn print_section(title: &str) {
    let line = "=".repeat(SEPARATOR_WIDTH);
    println!("{}", line);
    println!("{}", title);
    println!("{}", line);
    println!();
}

fn print_subsection(title: &str) {
    let line = "-".repeat(SEPARATOR_WIDTH);
    println!("{}", line);
    println!("{}", title);
    println!("{}", line);
    println!();
}
