//! Pure projection from (files, search state) to the visible file list

use crate::naming::{names_match, normalize};
use crate::types::FileEntry;

use super::SearchState;

/// Case-insensitive substring filter on file names.
///
/// A blank query keeps every file.
pub fn filter_by_name<'a>(files: &'a [FileEntry], query: &str) -> Vec<&'a FileEntry> {
    if query.trim().is_empty() {
        return files.iter().collect();
    }
    let needle = query.to_lowercase();
    files
        .iter()
        .filter(|file| file.file_name.to_lowercase().contains(&needle))
        .collect()
}

/// Files whose normalised name contains, or is contained by, a normalised source name.
///
/// A source that normalises to `""` is contained in every name and so
/// matches every file; an empty source list matches nothing.
pub fn match_sources<'a, S: AsRef<str>>(files: &'a [FileEntry], sources: &[S]) -> Vec<&'a FileEntry> {
    let sources: Vec<String> = sources.iter().map(|s| normalize(s.as_ref())).collect();

    files
        .iter()
        .filter(|file| {
            let name = normalize(&file.file_name);
            sources.iter().any(|source| names_match(&name, source))
        })
        .collect()
}

/// Visible files for the current search state
pub fn project<'a>(files: &'a [FileEntry], state: &SearchState) -> Vec<&'a FileEntry> {
    match (&state.smart_search_results, state.smart_search_enabled) {
        (Some(sources), true) => match_sources(files, sources.as_slice()),
        _ => filter_by_name(files, &state.query_text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn files(names: &[&str]) -> Vec<FileEntry> {
        names
            .iter()
            .map(|n| FileEntry::new(*n, format!("plan-comun/CII-2750/{}", n)))
            .collect()
    }

    fn names<'a>(visible: &[&'a FileEntry]) -> Vec<&'a str> {
        visible.iter().map(|f| f.file_name.as_str()).collect()
    }

    #[test]
    fn test_filter_by_name_case_insensitive() {
        let all = files(&["Tarea_1.pdf", "Guia-2.pdf", "tarea_2.PDF"]);
        assert_eq!(names(&filter_by_name(&all, "TAREA")), vec!["Tarea_1.pdf", "tarea_2.PDF"]);
        assert_eq!(filter_by_name(&all, "").len(), 3);
        assert_eq!(filter_by_name(&all, "   ").len(), 3);
        assert!(filter_by_name(&all, "examen").is_empty());
    }

    #[test]
    fn test_smart_projection_matches_normalised_sources() {
        let all = files(&["Tarea_1.pdf", "Guia-2.pdf"]);
        let state = SearchState {
            smart_search_enabled: true,
            smart_search_results: Some(vec!["tarea1".to_string()]),
            ..Default::default()
        };
        assert_eq!(names(&project(&all, &state)), vec!["Tarea_1.pdf"]);
    }

    #[test]
    fn test_smart_projection_is_bidirectional() {
        let all = files(&["Tarea_1.pdf", "Clase 03 - Grafos y Árboles.pdf"]);
        let sources = ["Tarea_1 - Enunciado completo", "grafos"];
        assert_eq!(
            names(&match_sources(&all, &sources)),
            vec!["Tarea_1.pdf", "Clase 03 - Grafos y Árboles.pdf"]
        );
    }

    #[test]
    fn test_empty_results_differ_from_not_run() {
        let all = files(&["Tarea_1.pdf", "Guia-2.pdf"]);

        let ran_empty = SearchState {
            smart_search_enabled: true,
            smart_search_results: Some(Vec::new()),
            ..Default::default()
        };
        assert!(project(&all, &ran_empty).is_empty());

        let not_run = SearchState {
            smart_search_enabled: true,
            smart_search_results: None,
            ..Default::default()
        };
        assert_eq!(project(&all, &not_run).len(), 2);
    }

    #[test]
    fn test_results_ignored_when_smart_search_disabled() {
        let all = files(&["Tarea_1.pdf", "Guia-2.pdf"]);
        let state = SearchState {
            query_text: "guia".to_string(),
            smart_search_enabled: false,
            smart_search_results: Some(vec!["tarea1".to_string()]),
            ..Default::default()
        };
        assert_eq!(names(&project(&all, &state)), vec!["Guia-2.pdf"]);
    }

    #[test]
    fn test_blank_source_names_match_every_file() {
        let all = files(&["Tarea_1.pdf", "Guia-2.pdf"]);
        assert_eq!(match_sources(&all, &["", " - "]).len(), 2);

        let state = SearchState {
            smart_search_enabled: true,
            smart_search_results: Some(vec![".pdf".to_string()]),
            ..Default::default()
        };
        assert_eq!(names(&project(&all, &state)), vec!["Tarea_1.pdf", "Guia-2.pdf"]);
    }

    #[test]
    fn test_no_sources_match_nothing() {
        let all = files(&["Tarea_1.pdf"]);
        assert!(match_sources::<&str>(&all, &[]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_name_filter_is_subset(
            file_names in proptest::collection::vec("[A-Za-z_ -]{0,10}", 0..12),
            query in "[a-zA-Z]{0,3}",
        ) {
            let refs: Vec<&str> = file_names.iter().map(String::as_str).collect();
            let all = files(&refs);
            let visible = filter_by_name(&all, &query);

            prop_assert!(visible.len() <= all.len());
            let needle = query.to_lowercase();
            for file in &visible {
                prop_assert!(all.contains(*file));
                prop_assert!(file.file_name.to_lowercase().contains(&needle));
            }
            if query.is_empty() {
                prop_assert_eq!(visible.len(), all.len());
            }
        }
    }
}
