use std::collections::HashMap;

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let vs: Vec<(String, String)> = serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        let items: HashMap<String, String> = vs.into_iter().collect();

        QueryString {
            items,
        }
    }

    pub fn get_page(&self) -> u32 {
        let val = match self.items.get("page") {
            None => return 1,
            Some(val) => val,
        };
        match val.trim().parse::<u32>() {
            Ok(0) | Err(_) => 1,
            Ok(val) => val,
        }
    }

    /// Trimmed value, `None` when missing or blank.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.items.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }
}

/// Builds a listing url keeping the active filters. Page 1 is implicit.
pub fn make_list_url(base: &str, query: Option<&str>, category: Option<&str>, page: u32) -> String {
    let mut params: Vec<(&str, String)> = vec![];
    if let Some(q) = query {
        params.push(("q", q.to_string()));
    }
    if let Some(category) = category {
        params.push(("category", category.to_string()));
    }
    if page > 1 {
        params.push(("page", page.to_string()));
    }

    match serde_urlencoded::to_string(&params) {
        Ok(qs) if !qs.is_empty() => format!("{}?{}", base, qs),
        _ => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_page() {
        assert_eq!(QueryString::from("").get_page(), 1);
        assert_eq!(QueryString::from("page=3").get_page(), 3);
        assert_eq!(QueryString::from("page=0").get_page(), 1);
        assert_eq!(QueryString::from("page=-2").get_page(), 1);
        assert_eq!(QueryString::from("page=abc").get_page(), 1);
        assert_eq!(QueryString::from("q=x&page=%202").get_page(), 2);
    }

    #[test]
    fn test_get_str() {
        let qs = QueryString::from("q=+Shopify+Migration+&category=&other=%20");
        assert_eq!(qs.get_str("q"), Some("Shopify Migration"));
        assert_eq!(qs.get_str("category"), None);
        assert_eq!(qs.get_str("other"), None);
        assert_eq!(qs.get_str("missing"), None);
    }

    #[test]
    fn test_parse_query_str() {
        let buf = "bread=baguette&cheese=comt%C3%A9&meat=ham&fat=butter";
        let meal = vec![
            ("bread".to_owned(), "baguette".to_owned()),
            ("cheese".to_owned(), "comté".to_owned()),
            ("meat".to_owned(), "ham".to_owned()),
            ("fat".to_owned(), "butter".to_owned()),
        ].into_iter().collect::<HashMap<_, _>>();

        let expected = QueryString {
            items: meal,
        };

        assert_eq!(QueryString::from(buf), expected);
    }

    #[test]
    fn test_parse_invalid_query_str() {
        let buf = "";
        let expected = QueryString {
            items: Default::default(),
        };
        assert_eq!(QueryString::from(buf), expected);
    }

    #[test]
    fn test_parse_key_only_query_str() {
        let buf = "key-only";
        let expected: HashMap<String, String> = vec![("key-only", "")].iter().map(|(x, y)| (x.to_string(), y.to_string())).collect::<HashMap<_, _>>();
        assert_eq!(QueryString::from(buf), QueryString { items: expected });
    }

    #[test]
    fn test_make_list_url() {
        assert_eq!(make_list_url("/blog", None, None, 1), "/blog");
        assert_eq!(make_list_url("/blog", None, None, 2), "/blog?page=2");
        assert_eq!(make_list_url("/blog", Some("shopify plus"), None, 1), "/blog?q=shopify+plus");
        assert_eq!(make_list_url("/blog", Some("cro"), Some("Guides & Tips"), 3), "/blog?q=cro&category=Guides+%26+Tips&page=3");
    }
}
