use aqlfilter::query::{
    FieldMap, Filter, Logic, SequentialIdents, gen_qualified_aql_filter_statement_with,
    group_terms, parse_filter_string, Term,
};
use proptest::prelude::*;

fn logic() -> impl Strategy<Value = Option<Logic>> {
    prop_oneof![Just(Some(Logic::And)), Just(Some(Logic::Or))]
}

// Combinator spellings, including blank-prefixed and missing ones.
fn separator() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(";"), Just(","), Just(" ;"), Just(" ,"), Just("&"), Just(" | ")]
}

proptest! {
    #![proptest_config(proptest::test_runner::Config {
        cases: 64,
        .. proptest::test_runner::Config::default()
    })]

    #[test]
    fn prop_parse_count_and_order(items in proptest::collection::vec(("[a-z]{1,6}", "[a-z0-9]{1,6}", logic()), 1..12)) {
        let mut s = String::new();
        for (field, value, l) in &items {
            s.push_str(&format!("{field}=={value}"));
            if let Some(l) = l {
                s.push(l.marker());
            }
        }
        let fls = parse_filter_string(&s).unwrap();
        prop_assert_eq!(fls.len(), items.len());
        for (f, (field, value, _)) in fls.iter().zip(&items) {
            prop_assert_eq!(f.field(), field.as_str());
            prop_assert_eq!(f.value(), value.as_str());
        }
        prop_assert_eq!(fls.last().and_then(Filter::logic), None);
    }

    #[test]
    fn prop_every_adjacent_pair_gets_one_joiner(items in proptest::collection::vec(("[a-z]{1,6}", "[a-z0-9]{1,6}", separator()), 1..10)) {
        let mut s = String::new();
        for (i, (field, value, sep)) in items.iter().enumerate() {
            if i > 0 {
                s.push_str(sep);
            }
            s.push_str(&format!("{field}=={value}"));
        }
        let fls = parse_filter_string(&s).unwrap();
        prop_assert_eq!(fls.len(), items.len());
        for f in &fls[..fls.len() - 1] {
            prop_assert!(f.logic().is_some());
        }

        let fmap: FieldMap = items.iter().map(|(f, _, _)| (f.as_str(), f.as_str())).collect();
        let out = gen_qualified_aql_filter_statement_with(&fmap, &fls, &mut SequentialIdents::default()).unwrap();
        let words: Vec<&str> = out.split_whitespace().collect();
        let joiners = words.iter().filter(|w| **w == "AND" || **w == "OR").count();
        prop_assert_eq!(joiners, items.len() - 1);
        // a term is `path == 'value'`; a value token must not be directly followed by a path
        for pair in words.windows(2) {
            if pair[0].starts_with('\'') {
                prop_assert!(pair[1] == "AND" || pair[1] == "OR" || pair[1] == ")", "{out}");
            }
        }
    }

    #[test]
    fn prop_groups_balance_and_wrap_or_runs(logics in proptest::collection::vec(logic(), 0..16)) {
        let mut terms: Vec<Term> = logics
            .iter()
            .enumerate()
            .map(|(i, l)| Term { text: format!("T{i}"), logic: *l })
            .collect();
        terms.push(Term { text: format!("T{}", logics.len()), logic: None });
        let tokens = group_terms(&terms);

        let mut depth = 0i32;
        let mut groups = 0usize;
        for t in &tokens {
            match t.as_str() {
                "(" => { depth += 1; groups += 1; prop_assert_eq!(depth, 1); }
                ")" => { depth -= 1; prop_assert!(depth >= 0); }
                "OR" => prop_assert_eq!(depth, 1),
                _ => {}
            }
        }
        prop_assert_eq!(depth, 0);

        let mut runs = 0usize;
        let mut prev_or = false;
        for l in &logics {
            let is_or = *l == Some(Logic::Or);
            if is_or && !prev_or { runs += 1; }
            prev_or = is_or;
        }
        prop_assert_eq!(groups, runs);
        let term_count = tokens.iter().filter(|t| t.starts_with('T')).count();
        prop_assert_eq!(term_count, terms.len());
    }

    #[test]
    fn prop_array_filters_get_one_binding_each(n in 1usize..8) {
        let s: Vec<String> = (0..n).map(|i| format!("tags@==v{i}")).collect();
        let fls = parse_filter_string(&s.join(";")).unwrap();
        let fmap: FieldMap = [("tags", "doc.tags")].into_iter().collect();
        let out = gen_qualified_aql_filter_statement_with(&fmap, &fls, &mut SequentialIdents::default()).unwrap();
        prop_assert_eq!(out.matches("LET ").count(), n);
        prop_assert_eq!(out.matches(") > 0").count(), n);
    }
}
