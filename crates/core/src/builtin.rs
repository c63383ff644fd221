//! Built-in business slide catalog.
//!
//! Defaults double as the placeholder content of the template deck.

use crate::catalog::{Catalog, CatalogEntry, Column, FieldShape, FieldSpec, Len};
use serde_json::{json, Value};

fn title(key: &str, default: &str) -> FieldSpec {
    FieldSpec::new(
        key,
        format!("slide title (default: '{default}')"),
        FieldShape::Text {
            max_chars: Some(60),
        },
        json!(default),
    )
}

fn text(key: &str, description: &str, max_chars: usize, default: &str) -> FieldSpec {
    FieldSpec::new(
        key,
        description,
        FieldShape::Text {
            max_chars: Some(max_chars),
        },
        json!(default),
    )
}

fn list(key: &str, description: &str, len: Len, max_chars: Option<usize>, default: Value) -> FieldSpec {
    FieldSpec::new(key, description, FieldShape::List { len, max_chars }, default)
}

/// Severity words accepted in risk tables.
const SEVERITIES: [&str; 4] = ["low", "medium", "high", "critical"];

fn capped(limits: &[usize]) -> Vec<Column> {
    limits.iter().map(|&max| Column::text(max)).collect()
}

fn table(key: &str, description: &str, len: Len, columns: Vec<Column>, default: Value) -> FieldSpec {
    FieldSpec::new(
        key,
        description,
        FieldShape::Table {
            len,
            columns,
            split_text: false,
        },
        default,
    )
}

/// A contact table, also accepted as one `"email | phone"` string.
fn contact_table(key: &str, description: &str, len: Len, columns: Vec<Column>, default: Value) -> FieldSpec {
    FieldSpec::new(
        key,
        description,
        FieldShape::Table {
            len,
            columns,
            split_text: true,
        },
        default,
    )
}

fn series(key: &str, description: &str, categories: &str, len: Len, default: Value) -> FieldSpec {
    FieldSpec::new(
        key,
        description,
        FieldShape::Series {
            categories: categories.to_string(),
            len,
        },
        default,
    )
}

fn columns(key: &str, description: &str, keys: (&str, &str), len: Len, items: Len, default: Value) -> FieldSpec {
    FieldSpec::new(
        key,
        description,
        FieldShape::Columns {
            title_key: keys.0.to_string(),
            items_key: keys.1.to_string(),
            len,
            items,
        },
        default,
    )
}

pub(crate) fn catalog() -> Catalog {
    let builder = Catalog::builder()
        .fixed(cover())
        .fixed(thank_you())
        .entry(
            CatalogEntry::new("company_overview", "Company mission statement and 4 quick facts")
                .in_group("Company")
                .field(title("overview_title", "Company Overview"))
                .field(text(
                    "overview_mission",
                    "2-3 sentences about the company mission",
                    300,
                    "We help organizations turn complex challenges into measurable results.",
                ))
                .field(table(
                    "overview_facts",
                    r#"[["Label","Value"], ...] e.g. [["Founded","2005"],["Employees","2500+"]]"#,
                    Len::exact(4),
                    capped(&[25, 20]),
                    json!([["Founded", "2005"], ["Employees", "2,500+"], ["Offices", "12"], ["Clients", "400+"]]),
                )),
        )
        .entry(
            CatalogEntry::new("our_values", "4 core company values with descriptions")
                .in_group("Company")
                .field(title("values_title", "Our Values"))
                .field(table(
                    "values",
                    r#"[["Value Name","One-sentence description"], ...]"#,
                    Len::exact(4),
                    capped(&[30, 120]),
                    json!([
                        ["Integrity", "We do what we say and say what we do."],
                        ["Customer Focus", "Every decision starts with the customer."],
                        ["Innovation", "We question the status quo to find better ways."],
                        ["Teamwork", "We win together by sharing knowledge openly."]
                    ]),
                )),
        )
        .entry(
            CatalogEntry::new("team_leadership", "Leadership team: 4 executives with names, titles, bios")
                .in_group("Company")
                .field(title("team_title", "Leadership Team"))
                .field(table(
                    "team",
                    r#"[["Full Name","Job Title","One-line bio"], ...]"#,
                    Len::exact(4),
                    capped(&[30, 40, 80]),
                    json!([
                        ["Jordan Lee", "Chief Executive Officer", "20 years leading growth-stage companies."],
                        ["Priya Shah", "Chief Financial Officer", "Former investment banker and audit lead."],
                        ["Marcus Chen", "Chief Technology Officer", "Built platforms serving millions of users."],
                        ["Elena Garcia", "Chief Operating Officer", "Scaled operations across three continents."]
                    ]),
                )),
        )
        .entry(
            CatalogEntry::new("key_facts", "6 big headline statistics or metrics in large font")
                .in_group("Company")
                .field(title("key_facts_title", "Key Facts & Figures"))
                .field(table(
                    "key_facts",
                    r#"[["$850M","Annual Revenue"], ...]"#,
                    Len::exact(6),
                    capped(&[15, 30]),
                    json!([
                        ["$850M", "Annual Revenue"],
                        ["2,500+", "Employees"],
                        ["40", "Countries Served"],
                        ["98%", "Client Retention"],
                        ["15", "Years in Business"],
                        ["#1", "Market Position"]
                    ]),
                )),
        )
        .entry(
            CatalogEntry::new("executive_summary", "5 bullet points summarizing key takeaways plus 3 headline metrics")
                .in_group("Summary")
                .field(title("exec_title", "Executive Summary"))
                .field(list(
                    "exec_bullets",
                    "5 full-sentence bullets",
                    Len::exact(5),
                    Some(150),
                    json!([
                        "Revenue grew steadily across all core segments.",
                        "Operating margin improved through disciplined cost control.",
                        "Two new markets were entered ahead of plan.",
                        "Customer satisfaction reached an all-time high.",
                        "The roadmap positions us for continued growth."
                    ]),
                ))
                .field(table(
                    "exec_metrics",
                    r#"[["$850M","Revenue"], ...]"#,
                    Len::exact(3),
                    capped(&[15, 25]),
                    json!([["$850M", "Revenue"], ["18%", "Growth"], ["92", "NPS"]]),
                )),
        )
        .entry(
            CatalogEntry::new("kpi_dashboard", "4-KPI dashboard with values, trends, and progress bars")
                .in_group("Summary")
                .field(title("kpi_title", "KPI Dashboard"))
                .field(table(
                    "kpis",
                    r#"[["KPI Name","Value","+23%",0.85,"↑"], ...] progress is 0.0-1.0"#,
                    Len::exact(4),
                    vec![Column::text(25), Column::text(15), Column::text(10), Column::Fraction, Column::text(5)],
                    json!([
                        ["Revenue", "$850M", "+12%", 0.85, "↑"],
                        ["Gross Margin", "42%", "+3%", 0.7, "↑"],
                        ["Churn", "4.1%", "-1%", 0.4, "↓"],
                        ["NPS", "62", "+8", 0.62, "↑"]
                    ]),
                )),
        )
        .entry(
            CatalogEntry::new("process_linear", "5-step linear process flow (left to right)")
                .in_group("Process")
                .field(title("process_title", "Our Process"))
                .field(table(
                    "process_steps",
                    r#"[["Step Title","Short description"], ...]"#,
                    Len::exact(5),
                    capped(&[30, 100]),
                    json!([
                        ["Discover", "Understand goals and constraints."],
                        ["Design", "Shape the solution with stakeholders."],
                        ["Build", "Deliver in short, tested increments."],
                        ["Launch", "Roll out with training and support."],
                        ["Improve", "Measure results and iterate."]
                    ]),
                )),
        )
        .entry(
            CatalogEntry::new("process_circular", "4-phase circular or cycle diagram")
                .in_group("Process")
                .field(title("cycle_title", "Continuous Improvement Cycle"))
                .field(list(
                    "cycle_phases",
                    r#"["Plan","Execute","Review","Improve"]"#,
                    Len::exact(4),
                    Some(30),
                    json!(["Plan", "Execute", "Review", "Improve"]),
                )),
        )
        .entry(
            CatalogEntry::new("roadmap_timeline", "5-milestone timeline or roadmap")
                .in_group("Process")
                .field(title("roadmap_title", "Strategic Roadmap"))
                .field(table(
                    "milestones",
                    r#"[["Q1 2026","Title","Description"], ...]"#,
                    Len::exact(5),
                    capped(&[15, 30, 80]),
                    json!([
                        ["Q1 2026", "Foundation", "Stand up the core team and tooling."],
                        ["Q2 2026", "Pilot", "Launch with three design partners."],
                        ["Q3 2026", "Expansion", "Open to the wider customer base."],
                        ["Q4 2026", "Scale", "Automate onboarding and support."],
                        ["Q1 2027", "Optimize", "Tune pricing and unit economics."]
                    ]),
                )),
        )
        .entry(
            CatalogEntry::new("swot_matrix", "SWOT analysis: 4 quadrants, 3 items each")
                .in_group("Analysis")
                .field(title("swot_title", "SWOT Analysis"))
                .field(FieldSpec::new(
                    "swot",
                    r#"{"strengths":["...","...","..."],"weaknesses":[...],"opportunities":[...],"threats":[...]}"#,
                    FieldShape::Quadrants {
                        names: ["strengths", "weaknesses", "opportunities", "threats"]
                            .map(String::from)
                            .to_vec(),
                        len: Len::exact(3),
                        max_chars: Some(76),
                    },
                    json!({
                        "strengths": ["Strong brand", "Loyal customers", "Experienced team"],
                        "weaknesses": ["Legacy systems", "Limited reach", "Slow hiring"],
                        "opportunities": ["New markets", "Partnerships", "Automation"],
                        "threats": ["New entrants", "Regulation", "Economic slowdown"]
                    }),
                )),
        )
        .entry(
            CatalogEntry::new("bar_chart", "Grouped bar chart with 3-8 categories and 1-4 series")
                .in_group("Data")
                .field(text("bar_title", "chart title", 60, "Revenue by Region"))
                .field(list(
                    "bar_categories",
                    "category labels",
                    Len::range(3, 8),
                    Some(25),
                    json!(["North", "South", "East", "West"]),
                ))
                .field(series(
                    "bar_series",
                    r#"[{"name":"FY 2025","values":[n per category]}, ...]"#,
                    "bar_categories",
                    Len::range(1, 4),
                    json!([
                        {"name": "FY 2025", "values": [120, 95, 140, 88]},
                        {"name": "FY 2026", "values": [135, 110, 150, 97]}
                    ]),
                )),
        )
        .entry(
            CatalogEntry::new("line_chart", "Line chart with 3-8 time periods and 1-4 series")
                .in_group("Data")
                .field(text("line_title", "chart title", 60, "Growth Trend"))
                .field(list(
                    "line_categories",
                    "time periods",
                    Len::range(3, 8),
                    Some(25),
                    json!(["2022", "2023", "2024", "2025", "2026"]),
                ))
                .field(series(
                    "line_series",
                    r#"[{"name":"Revenue","values":[n per category]}, ...]"#,
                    "line_categories",
                    Len::range(1, 4),
                    json!([{"name": "Revenue", "values": [410, 520, 610, 730, 850]}]),
                )),
        )
        .entry(
            CatalogEntry::new("pie_chart", "Pie or donut chart: 3-8 segments that MUST sum to 100")
                .in_group("Data")
                .field(text("pie_title", "chart title", 60, "Revenue Mix"))
                .field(list(
                    "pie_categories",
                    "segment names",
                    Len::range(3, 8),
                    Some(25),
                    json!(["Enterprise", "Mid-Market", "SMB", "Other"]),
                ))
                .field(FieldSpec::new(
                    "pie_values",
                    "integers that SUM TO 100, one per segment",
                    FieldShape::Percentages {
                        len: Len::range(3, 8),
                        labels: Some("pie_categories".to_string()),
                        legend: Some("pie_legend".to_string()),
                    },
                    json!([42, 28, 20, 10]),
                ))
                .field(list(
                    "pie_legend",
                    r#"["Enterprise (42%)", ...]"#,
                    Len::range(3, 8),
                    Some(40),
                    json!(["Enterprise (42%)", "Mid-Market (28%)", "SMB (20%)", "Other (10%)"]),
                )),
        )
        .entry(
            CatalogEntry::new("comparison", "Side-by-side comparison table: 2 options across 6 metrics")
                .in_group("Analysis")
                .field(title("comparison_title", "Comparison"))
                .field(list(
                    "comparison_headers",
                    r#"["Option A","Option B"]"#,
                    Len::exact(2),
                    Some(25),
                    json!(["Option A", "Option B"]),
                ))
                .field(table(
                    "comparison_rows",
                    r#"[["Metric","A value","B value"], ...]"#,
                    Len::exact(6),
                    capped(&[25, 25, 25]),
                    json!([
                        ["Cost", "$1.2M", "$0.9M"],
                        ["Time to value", "6 months", "9 months"],
                        ["Risk", "Low", "Medium"],
                        ["Scalability", "High", "Medium"],
                        ["Support", "24/7", "Business hours"],
                        ["Fit", "Strong", "Partial"]
                    ]),
                )),
        )
        .entry(
            CatalogEntry::new("data_table", "5-column data table with 6 rows")
                .in_group("Data")
                .field(text("table_title", "table title", 60, "Performance by Segment"))
                .field(list(
                    "table_headers",
                    "5 column headers",
                    Len::exact(5),
                    Some(25),
                    json!(["Segment", "Revenue", "Growth", "Margin", "Share"]),
                ))
                .field(table(
                    "table_rows",
                    "6 rows, each 5 columns",
                    Len::exact(6),
                    vec![Column::unbounded(); 5],
                    json!([
                        ["Enterprise", "$357M", "14%", "45%", "42%"],
                        ["Mid-Market", "$238M", "11%", "39%", "28%"],
                        ["SMB", "$170M", "9%", "33%", "20%"],
                        ["Public Sector", "$51M", "6%", "30%", "6%"],
                        ["Partners", "$25M", "18%", "28%", "3%"],
                        ["Other", "$9M", "2%", "20%", "1%"]
                    ]),
                ))
                .field(list(
                    "table_col_widths",
                    "5 column widths in inches, e.g. [2.0, 1.2, 1.2, 1.2, 1.0]",
                    Len::exact(5),
                    None,
                    json!([2.0, 1.2, 1.2, 1.2, 1.0]),
                )),
        )
        .entry(
            CatalogEntry::new(
                "two_column",
                "Two-column layout: intro text and approach bullets on the left, 2 themed sections on the right",
            )
            .in_group("Structure")
            .field(title("two_col_title", "Strategic Priorities"))
            .field(text("approach_intro", "1-2 sentences", 200, "Our approach balances near-term wins with long-term bets."))
            .field(list(
                "approach_bullets",
                "5 bullets",
                Len::exact(5),
                Some(150),
                json!([
                    "Protect the core business",
                    "Invest in adjacent markets",
                    "Modernize the platform",
                    "Develop our people",
                    "Measure what matters"
                ]),
            ))
            .field(columns(
                "col2",
                r#"[{"heading":"Short-Term Goals","bullets":["b1","b2","b3","b4"]},{"heading":"Long-Term Vision","bullets":[...]}]"#,
                ("heading", "bullets"),
                Len::exact(2),
                Len::exact(4),
                json!([
                    {"heading": "Short-Term Goals", "bullets": ["Ship v2", "Grow pipeline", "Cut costs", "Hire leads"]},
                    {"heading": "Long-Term Vision", "bullets": ["Global reach", "Platform play", "Category leader", "Durable margins"]}
                ]),
            )),
        )
        .entry(
            CatalogEntry::new("three_column", "Three pillars or columns: 3 key offerings or focus areas")
                .in_group("Structure")
                .field(title("pillars_title", "Key Focus Areas"))
                .field(table(
                    "pillars",
                    r#"[["Pillar Title","Description sentence"], ...]"#,
                    Len::exact(3),
                    capped(&[30, 120]),
                    json!([
                        ["Growth", "Expand into new segments and regions."],
                        ["Efficiency", "Simplify how we work and deliver."],
                        ["Talent", "Attract and keep the best people."]
                    ]),
                )),
        )
        .entry(
            CatalogEntry::new("highlight_quote", "Full-slide inspirational quote with attribution")
                .in_group("Closing")
                .field(text("quote_text", "2-3 sentences", 300, "The best way to predict the future is to create it."))
                .field(text("quote_attribution", r#""Name, Title""#, 80, "Peter Drucker, Management Consultant"))
                .field(text("quote_source", "source reference", 120, "The Essential Drucker")),
        )
        .entry(
            CatalogEntry::new("infographic_dashboard", "Mixed infographic: 3 KPIs, mini bar chart, 4 progress bars")
                .in_group("Data")
                .field(title("infographic_title", "Performance Dashboard"))
                .field(table(
                    "infographic_kpis",
                    r#"[["$850M","Revenue"], ...]"#,
                    Len::exact(3),
                    capped(&[15, 25]),
                    json!([["$850M", "Revenue"], ["18%", "Growth"], ["92", "NPS"]]),
                ))
                .field(text("infographic_chart_title", "mini chart title", 60, "Quarterly Revenue"))
                .field(list(
                    "infographic_chart_cats",
                    "4 category labels",
                    Len::exact(4),
                    Some(15),
                    json!(["Q1", "Q2", "Q3", "Q4"]),
                ))
                .field(series(
                    "infographic_chart_series",
                    r#"[{"name":"2025","values":[n x4]},{"name":"2026","values":[n x4]}]"#,
                    "infographic_chart_cats",
                    Len::exact(2),
                    json!([
                        {"name": "2025", "values": [190, 205, 215, 240]},
                        {"name": "2026", "values": [210, 226, 238, 262]}
                    ]),
                ))
                .field(table(
                    "infographic_progress",
                    r#"[["Phase label",0.75], ...] progress 0.0-1.0"#,
                    Len::exact(4),
                    vec![Column::text(30), Column::Fraction],
                    json!([["Research", 1.0], ["Development", 0.75], ["Testing", 0.5], ["Launch", 0.2]]),
                )),
        )
        .entry(
            CatalogEntry::new("next_steps", "4 action items with owner and due date")
                .in_group("Closing")
                .field(title("next_steps_title", "Next Steps & Action Items"))
                .field(table(
                    "next_steps",
                    r#"[["Action Title","Description","Owner","Due Date"], ...]"#,
                    Len::exact(4),
                    capped(&[40, 80, 25, 25]),
                    json!([
                        ["Approve budget", "Confirm funding for phase one.", "CFO", "Mar 15"],
                        ["Form team", "Staff the core delivery team.", "COO", "Mar 30"],
                        ["Kick off pilot", "Start with two customers.", "CTO", "Apr 15"],
                        ["Review results", "Report pilot outcomes to the board.", "CEO", "Jun 30"]
                    ]),
                )),
        )
        .entry(
            CatalogEntry::new("call_to_action", "Bold CTA headline with contact details")
                .in_group("Closing")
                .field(text("cta_headline", "bold CTA, may contain \\n", 80, "Let's build what's next, together."))
                .field(text("cta_subtitle", "supporting sentence", 200, "Reach out to start the conversation."))
                .field(contact_table(
                    "cta_contacts",
                    r#"[["Email","contact@company.com"],["Phone","+1 (555) 123-4567"],["Web","www.company.com"]]"#,
                    Len::exact(3),
                    capped(&[40, 60]),
                    json!([["Email", "contact@company.com"], ["Phone", "+1 (555) 123-4567"], ["Web", "www.company.com"]]),
                )),
        )
        .entry(
            CatalogEntry::new("funnel_diagram", "4-5 stage conversion funnel showing progressive narrowing")
                .in_group("Data")
                .field(title("funnel_title", "Conversion Funnel"))
                .field(table(
                    "funnel_stages",
                    r#"[["Stage Name","Value/Metric","Description"], ...]"#,
                    Len::range(3, 6),
                    capped(&[30, 15, 80]),
                    json!([
                        ["Awareness", "100K", "Visitors reached by campaigns."],
                        ["Interest", "25K", "Engaged with content."],
                        ["Consideration", "6K", "Requested a demo."],
                        ["Purchase", "1.2K", "Became customers."]
                    ]),
                )),
        )
        .entry(
            CatalogEntry::new(
                "pyramid_hierarchy",
                "4-5 layer pyramid showing hierarchical structure (top=narrow, bottom=wide)",
            )
            .in_group("Structure")
            .field(title("pyramid_title", "Strategic Hierarchy"))
            .field(table(
                "pyramid_layers",
                r#"[["Layer Name","Description"], ...] first item is the top/narrow layer"#,
                Len::range(3, 6),
                capped(&[30, 120]),
                json!([
                    ["Vision", "Where we are going."],
                    ["Strategy", "How we will get there."],
                    ["Initiatives", "What we will do this year."],
                    ["Operations", "How we run every day."]
                ]),
            )),
        )
        .entry(
            CatalogEntry::new("venn_diagram", "2-3 overlapping circles showing relationships and synergies")
                .in_group("Analysis")
                .field(title("venn_title", "Synergy Analysis"))
                .field(table(
                    "venn_sets",
                    r#"[["Set Label","Description"], ...]"#,
                    Len::range(2, 3),
                    capped(&[25, 100]),
                    json!([
                        ["Technology", "Modern, scalable platforms."],
                        ["People", "Skilled, motivated teams."],
                        ["Process", "Simple, repeatable ways of working."]
                    ]),
                ))
                .field(text("venn_overlap", "what the overlap represents", 60, "Sustainable advantage")),
        )
        .entry(
            CatalogEntry::new("hub_spoke", "Central hub with 4-6 radiating spoke elements")
                .in_group("Structure")
                .field(title("hub_title", "Core Capabilities"))
                .field(text("hub_center", "label for the central hub", 30, "Our Platform"))
                .field(table(
                    "hub_spokes",
                    r#"[["Spoke Label","Description"], ...]"#,
                    Len::range(4, 6),
                    capped(&[25, 80]),
                    json!([
                        ["Analytics", "Insight from every interaction."],
                        ["Security", "Protection by default."],
                        ["Integration", "Connects to existing tools."],
                        ["Support", "Experts when you need them."]
                    ]),
                )),
        )
        .entry(
            CatalogEntry::new("milestone_roadmap", "5-7 dated milestones on a horizontal timeline path")
                .in_group("Process")
                .field(title("milestone_title", "Project Milestones"))
                .field(table(
                    "milestone_items",
                    r#"[["Date","Title","Description"], ...]"#,
                    Len::range(5, 7),
                    capped(&[15, 30, 80]),
                    json!([
                        ["Jan", "Kickoff", "Project charter signed."],
                        ["Mar", "Design", "Architecture approved."],
                        ["May", "Build", "Core features complete."],
                        ["Jul", "Beta", "First customers onboarded."],
                        ["Sep", "Launch", "General availability."]
                    ]),
                )),
        )
        .entry(
            CatalogEntry::new("kanban_board", "3-column kanban board (To Do / In Progress / Done) with task cards")
                .in_group("Structure")
                .field(title("kanban_title", "Project Board"))
                .field(columns(
                    "kanban_columns",
                    r#"[{"title":"To Do","cards":["task1","task2"]}, {"title":"In Progress","cards":[...]}, {"title":"Done","cards":[...]}]"#,
                    ("title", "cards"),
                    Len::exact(3),
                    Len::range(0, 8),
                    json!([
                        {"title": "To Do", "cards": ["Define KPIs", "Draft budget"]},
                        {"title": "In Progress", "cards": ["Vendor review", "Hiring plan"]},
                        {"title": "Done", "cards": ["Market scan", "Kickoff"]}
                    ]),
                )),
        )
        .entry(
            CatalogEntry::new("matrix_quadrant", "2x2 matrix with labeled axes and four quadrants")
                .in_group("Analysis")
                .field(title("matrix_title", "Strategic Matrix"))
                .field(text("matrix_x_axis", "horizontal axis label (e.g. 'Impact')", 30, "Impact"))
                .field(text("matrix_y_axis", "vertical axis label (e.g. 'Effort')", 30, "Effort"))
                .field(table(
                    "matrix_quadrants",
                    r#"[["Quadrant Label","Description"], ...] order: top-left, top-right, bottom-left, bottom-right"#,
                    Len::exact(4),
                    vec![Column::unbounded(); 2],
                    json!([
                        ["Major Projects", "High impact, high effort."],
                        ["Quick Wins", "High impact, low effort."],
                        ["Thankless Tasks", "Low impact, high effort."],
                        ["Fill-ins", "Low impact, low effort."]
                    ]),
                )),
        )
        .entry(
            CatalogEntry::new("gauge_dashboard", "3-4 donut gauge meters showing progress toward targets")
                .in_group("Data")
                .field(title("gauge_title", "Performance Gauges"))
                .field(table(
                    "gauges",
                    r#"[["Metric Name","Display Value",0.82], ...] third element is 0.0-1.0 progress"#,
                    Len::range(3, 4),
                    vec![Column::text(25), Column::text(15), Column::Fraction],
                    json!([
                        ["Revenue Target", "82%", 0.82],
                        ["Customer Goal", "67%", 0.67],
                        ["Hiring Plan", "90%", 0.9]
                    ]),
                )),
        )
        .entry(
            CatalogEntry::new("icon_grid", "4-6 icon and text cards in a grid showing key capabilities")
                .in_group("Structure")
                .field(title("icon_grid_title", "Key Capabilities"))
                .field(table(
                    "icon_grid_items",
                    r#"[["icon_name","Title","Description"], ...] icon_name is a keyword like "chart","shield","globe""#,
                    Len::range(4, 6),
                    capped(&[20, 25, 80]),
                    json!([
                        ["chart", "Analytics", "Real-time performance insight."],
                        ["shield", "Security", "Enterprise-grade protection."],
                        ["globe", "Global", "Available in 40 countries."],
                        ["people", "Support", "Dedicated success teams."]
                    ]),
                )),
        )
        .entry(
            CatalogEntry::new("risk_matrix", "Color-coded risk assessment grid with positioned risk items")
                .in_group("Analysis")
                .field(title("risk_title", "Risk Assessment Matrix"))
                .field(text("risk_x_label", "horizontal axis (e.g. 'Likelihood')", 30, "Likelihood"))
                .field(text("risk_y_label", "vertical axis (e.g. 'Impact')", 30, "Impact"))
                .field(table(
                    "risk_items",
                    r#"[["Risk Name","low|medium|high|critical","Description"], ...]"#,
                    Len::range(4, 6),
                    vec![Column::text(30), Column::choice(&SEVERITIES, "medium"), Column::text(80)],
                    json!([
                        ["Supply delays", "high", "Key components face long lead times."],
                        ["Talent gaps", "medium", "Hard-to-fill specialist roles."],
                        ["Regulation", "medium", "New rules in two markets."],
                        ["Currency", "low", "Exposure to exchange-rate swings."]
                    ]),
                )),
        )
        .entry(
            CatalogEntry::new("sources", "Bibliography or references slide: 4-8 cited sources")
                .in_group("Closing")
                .field(title("sources_title", "Sources & References"))
                .field(list(
                    "sources_list",
                    r#"["Author (Year). Title. Publication.", ...]"#,
                    Len::range(4, 8),
                    Some(200),
                    json!([
                        "Company annual report (2025).",
                        "Industry outlook survey (2025). Market Research Group.",
                        "Customer satisfaction study (2025). Internal analysis.",
                        "Economic forecast (2026). Central Statistics Office."
                    ]),
                )),
        );

    aliases(builder).build()
}

fn cover() -> CatalogEntry {
    CatalogEntry::new("cover", "Title slide")
        .in_group("Cover")
        .field(text("cover_title", "bold headline", 80, "Presentation"))
        .field(text("cover_subtitle", "supporting line", 120, ""))
        .field(text("cover_date", r#"e.g. "February 2026  |  Confidential""#, 50, "2026  |  Confidential"))
}

fn thank_you() -> CatalogEntry {
    CatalogEntry::new("thank_you", "Closing slide with contact details")
        .in_group("Closing")
        .field(contact_table(
            "thankyou_contacts",
            r#"[["Email","contact@company.com","✉"],["Phone","+1 (555) 123-4567","☎"],["Website","www.company.com","⌂"],["Location","City, State","⚑"]]"#,
            Len::exact(4),
            capped(&[30, 40, 50]),
            json!([
                ["Email", "contact@company.com", "\u{2709}"],
                ["Phone", "+1 (555) 123-4567", "\u{260E}"],
                ["Website", "www.company.com", "\u{2302}"],
                ["Location", "", "\u{2691}"]
            ]),
        ))
}

fn aliases(builder: crate::catalog::CatalogBuilder) -> crate::catalog::CatalogBuilder {
    [
        ("exec_summary_title", "exec_title"),
        ("executive_summary_title", "exec_title"),
        ("exec_summary_text", "exec_bullets"),
        ("exec_summary_points", "exec_bullets"),
        ("exec_summary_bullets", "exec_bullets"),
        ("exec_summary_metrics", "exec_metrics"),
        ("kpi_cards", "kpis"),
        ("kpi_items", "kpis"),
        ("next_title", "next_steps_title"),
        ("next_items", "next_steps"),
        ("facts_items", "key_facts"),
        ("facts_title", "key_facts_title"),
        ("sources_items", "sources_list"),
        ("cta_body", "cta_subtitle"),
        ("cta_contact", "cta_contacts"),
        ("thankyou_message", "thankyou_contacts"),
        ("thankyou_contact", "thankyou_contacts"),
        ("comparison_columns", "comparison_headers"),
        ("roadmap_milestones", "milestones"),
        ("data_table_title", "table_title"),
        ("pie_segments", "pie_categories"),
        ("team_members", "team"),
        ("leadership_team", "team"),
    ]
    .into_iter()
    .fold(builder, |b, (alias, canonical)| b.alias(alias, canonical))
}
