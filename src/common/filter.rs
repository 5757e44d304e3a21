// src/common/filter.rs

/// Entidades que aparecem nas listas com busca + filtro categórico.
pub trait Searchable {
    /// Campos de texto onde o termo é procurado (nome, descrição, motivo...).
    fn search_fields(&self) -> Vec<&str>;

    /// Valor do filtro categórico (categoria, tipo, status).
    fn facet(&self) -> Option<&str> {
        None
    }
}

/// Sentinela que desliga o filtro categórico.
pub const ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Facet {
    All,
    Only(String),
}

impl Facet {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Facet::All,
            Some(v) if v.eq_ignore_ascii_case(ALL) => Facet::All,
            Some(v) => Facet::Only(v.to_string()),
        }
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Facet::All => true,
            Facet::Only(expected) => value == Some(expected.as_str()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchFilter {
    term: String,
    facet: Facet,
}

impl SearchFilter {
    pub fn new(term: Option<&str>, facet: Facet) -> Self {
        Self {
            term: term.unwrap_or_default().trim().to_lowercase(),
            facet,
        }
    }

    pub fn everything() -> Self {
        Self::new(None, Facet::All)
    }

    pub fn matches<T: Searchable + ?Sized>(&self, item: &T) -> bool {
        let matches_search = self.term.is_empty()
            || item
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&self.term));

        matches_search && self.facet.matches(item.facet())
    }

    /// Filtra sem alterar a coleção e preservando a ordem original.
    pub fn apply<'a, T: Searchable>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Row {
        name: &'static str,
        kind: &'static str,
    }

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name]
        }
        fn facet(&self) -> Option<&str> {
            Some(self.kind)
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Laptop", kind: "Electronics" },
            Row { name: "T-Shirt", kind: "Clothing" },
        ]
    }

    #[test]
    fn search_is_case_insensitive() {
        let rows = rows();
        for term in ["lap", "LAP", "Lap"] {
            let found = SearchFilter::new(Some(term), Facet::All).apply(&rows);
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].name, "Laptop");
        }
    }

    #[test]
    fn empty_term_returns_everything_in_order() {
        let rows = rows();
        let found = SearchFilter::new(Some(""), Facet::All).apply(&rows);
        assert_eq!(found, vec![&rows[0], &rows[1]]);
    }

    #[test]
    fn all_sentinel_imposes_no_restriction() {
        assert_eq!(Facet::parse(Some("all")), Facet::All);
        assert_eq!(Facet::parse(Some("ALL")), Facet::All);
        assert_eq!(Facet::parse(None), Facet::All);
        assert_eq!(Facet::parse(Some("Clothing")), Facet::Only("Clothing".into()));
    }

    #[test]
    fn facet_and_term_combine() {
        let rows = rows();
        let filter = SearchFilter::new(Some("t"), Facet::parse(Some("Clothing")));
        let found = filter.apply(&rows);
        assert_eq!(found, vec![&rows[1]]);

        let none = SearchFilter::new(Some("lap"), Facet::parse(Some("Clothing"))).apply(&rows);
        assert!(none.is_empty());
    }

    #[test]
    fn filtering_does_not_touch_the_source() {
        let rows = rows();
        let _ = SearchFilter::new(Some("zzz"), Facet::All).apply(&rows);
        assert_eq!(rows.len(), 2);
    }
}
