//! Synthetic FTK report used by the unit tests
//!
//! Mirrors the layout of a real FTK XSL-FO case report: a case information
//! page, a table of contents whose `start-indent` encodes the hierarchy, and
//! one `fo:table` per bookmarked file.

use super::document::FO_NAMESPACE;

/// One table-of-contents row: indent in points, label, optional bookmark ref
pub struct TocRow {
    pub indent: Option<u32>,
    pub label: &'static str,
    pub ref_id: Option<&'static str>,
}

const fn row(indent: u32, label: &'static str, ref_id: Option<&'static str>) -> TocRow {
    TocRow { indent: Some(indent), label, ref_id }
}

pub fn sample_toc() -> Vec<TocRow> {
    vec![
        TocRow { indent: None, label: "Table of Contents", ref_id: None },
        row(12, "Bookmarks", None),
        row(24, "Extents Test papers", None),
        row(36, "Series 1", None),
        row(48, "Subseries(1)", None),
        row(60, "ER 1: Text, 2023", Some("bk6001")),
        row(60, "Subsubseries(2)", None),
        row(72, "ER 2: File 15, 2023", Some("bk9001")),
        row(72, "Subsubsubseries(3)", None),
        row(84, "Subsubsubsubseries(4)", None),
        row(96, "ER 10: Folder 2, 2023", Some("bk12001")),
        row(60, "Subsubseries(2) the second", None),
        row(72, "ER 23: File 17, 2023", Some("bk13001")),
        row(48, "Subseries(1) the second", None),
        row(60, "ER 4: File 18, 2023", Some("bk14001")),
        row(60, "ER 5: No Files, 2023", Some("bk27001")),
        row(60, "ER 6: Zero Length, 2023", Some("bk28001")),
        row(36, "Series 2", None),
        row(48, "ER 9: File 20,2023", Some("bk15001")),
        row(48, "Subseries(1) of Series 2", None),
        row(60, "ER 8: File 2, 2023", Some("bk16001")),
        row(60, "Subsubseries(2) of Series 2", None),
        row(72, "ER 7: File 19, 2023", Some("bk17001")),
        row(36, "ER 10: File 21,2023", Some("bk18001")),
        row(36, "ER 3: Folder not bookmarked, 2023", Some("bk11001")),
        row(36, "DI 1: Disk image, 2023", Some("bk31001")),
        row(36, "ER 11: File 22, 2023", Some("bk19001")),
        row(36, "Notes without a record", Some("bk40001")),
    ]
}

/// Bookmarked files: (table id, file name, logical size cell)
pub fn sample_files() -> Vec<(String, String, String)> {
    let mut files = Vec::new();
    let mut add = |group: &str, index: usize, name: &str, size: &str| {
        files.push((format!("{}_{}", group, index), name.to_string(), size.to_string()));
    };

    // ER 1: seven files, 110 bytes
    for (i, size) in [10, 10, 15, 15, 20, 20, 20].iter().enumerate() {
        add("bf6001", i + 1, &format!("file{:02}.txt", i + 1), &format!("{} B", size));
    }
    // ER 2: one file
    add("bf9001", 1, "file15.txt", "16 B");
    // ER 10 (folder bookmarked): folder row without a size, five files
    add("bf12001", 1, "Folder 2", "");
    for i in 0..5 {
        add("bf12001", i + 2, &format!("folder2_{}.txt", i), "16 B");
    }
    // ER 3 (folder not bookmarked): five files
    for i in 0..5 {
        add("bf11001", i + 1, &format!("loose_{}.txt", i), "12 B");
    }
    // DI 1: size embedded in free text
    add("bf31001", 1, "disk.img", "7 KB (7168 B)");
    // ER 6: only a zero-length file
    add("bf28001", 1, "file00.txt", "0 B");
    add("bf13001", 1, "file17.txt", "17 B");
    add("bf14001", 1, "file18.txt", "18 B");
    add("bf15001", 1, "file20.txt", "20 B");
    add("bf16001", 1, "file2.txt", "2 B");
    add("bf17001", 1, "file19.txt", "19 B");
    add("bf18001", 1, "file21.txt", "21 B");
    add("bf19001", 1, "file22.txt", "22 B");
    files
}

fn toc_block(row: &TocRow) -> String {
    let indent = row
        .indent
        .map(|pt| format!(r#" start-indent="{}pt""#, pt))
        .unwrap_or_default();
    let citation = row
        .ref_id
        .map(|id| {
            format!(
                r#"<fo:leader leader-pattern="dots"/><fo:basic-link internal-destination="{id}"><fo:page-number-citation ref-id="{id}"/></fo:basic-link>"#,
                id = id
            )
        })
        .unwrap_or_default();
    format!("<fo:block{}>{}{}</fo:block>\n", indent, row.label, citation)
}

fn cell_pair(label: &str, value: &str) -> String {
    format!(
        "<fo:table-row><fo:table-cell><fo:block>{}</fo:block></fo:table-cell><fo:table-cell><fo:block>{}</fo:block></fo:table-cell></fo:table-row>",
        label, value
    )
}

pub fn file_table(id: &str, name: &str, size: &str) -> String {
    format!(
        "<fo:table id=\"{}\"><fo:table-body>{}{}{}</fo:table-body></fo:table>\n",
        id,
        cell_pair("Name", name),
        cell_pair("Logical Size", size),
        cell_pair("Path", &format!("Case/{}", name)),
    )
}

/// Wrap page-sequence flows in an FO root
pub fn report_from_sequences(sequences: &[(&str, String)]) -> String {
    let mut xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<fo:root xmlns:fo=\"{}\">\n",
        FO_NAMESPACE
    );
    for (master, flow) in sequences {
        xml.push_str(&format!(
            "<fo:page-sequence master-reference=\"{}\"><fo:flow flow-name=\"xsl-region-body\">\n{}</fo:flow></fo:page-sequence>\n",
            master, flow
        ));
    }
    xml.push_str("</fo:root>\n");
    xml
}

pub fn toc_flow(rows: &[TocRow]) -> String {
    rows.iter().map(toc_block).collect()
}

pub fn sample_report() -> String {
    let case_info = format!(
        "<fo:table><fo:table-body>{}{}</fo:table-body></fo:table>\n",
        cell_pair("Case Name", "M12345 Extents Test"),
        cell_pair("Case Number", ""),
    );

    let mut bookmarks = String::from("<fo:block id=\"bk6001\">Bookmark: ER 1</fo:block>\n");
    for (id, name, size) in sample_files() {
        bookmarks.push_str(&file_table(&id, &name, &size));
    }
    bookmarks.push_str("<fo:table><fo:table-body>");
    bookmarks.push_str(&cell_pair("Name", "table without id"));
    bookmarks.push_str("</fo:table-body></fo:table>\n");

    report_from_sequences(&[
        ("caseInfoPage", case_info),
        ("TOC", toc_flow(&sample_toc())),
        ("bookmarksPage", bookmarks),
    ])
}
