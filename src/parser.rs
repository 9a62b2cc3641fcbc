//! Span-preserving parser for JSON text.
//!
//! The syntax tree produced here is deliberately looser than [`crate::JsonValue`]: numbers keep
//! their source text, object members keep duplicates and order, and unparseable sub-values are
//! recovered as [`Json::Invalid`] so that one pass can report several errors.

use chumsky::prelude::*;

use crate::spanned::Spanned;

#[derive(Clone, Debug, PartialEq)]
pub enum Json {
    Invalid,
    Null,
    Bool(bool),
    Str(String),
    /// The number exactly as written.
    Num(String),
    Array(Vec<Spanned<Json>>),
    Object(Vec<(Spanned<String>, Spanned<Json>)>),
}

impl Json {
    pub fn kind_desc(&self) -> &'static str {
        match self {
            Json::Invalid => "invalid",
            Json::Null => "null",
            Json::Bool(_) => "bool",
            Json::Str(_) => "string",
            Json::Num(_) => "number",
            Json::Array(_) => "array",
            Json::Object(_) => "object",
        }
    }
}

/// The four whitespace characters JSON allows between tokens. `Parser::padded` would also skip
/// Unicode spaces such as U+00A0.
fn whitespace<'a>() -> impl Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone {
    one_of(" \t\r\n").repeated()
}

/// Adapted from: <https://github.com/zesterer/chumsky/blob/main/examples/json.rs>.
pub fn parser<'a>() -> impl Parser<'a, &'a str, Spanned<Json>, extra::Err<Rich<'a, char>>> {
    recursive(|value| {
        let digits = text::digits(10).to_slice();

        let frac = just('.').then(digits);

        let exp = just('e')
            .or(just('E'))
            .then(one_of("+-").or_not())
            .then(digits)
            .labelled("exponent");

        let number = just('-')
            .or_not()
            .then(text::int(10))
            .then(frac.or_not())
            .then(exp.or_not())
            .to_slice()
            .map(ToString::to_string)
            .boxed()
            .labelled("number");

        let escape = just('\\')
            .then(choice((
                just('\\'),
                just('/'),
                just('"'),
                just('b').to('\x08'),
                just('f').to('\x0C'),
                just('n').to('\n'),
                just('r').to('\r'),
                just('t').to('\t'),
                just('u').then(text::digits(16).exactly(4)).to('\u{FFFD}'),
            )))
            .ignored()
            .boxed()
            .labelled("escape character");

        // The grammar only checks the shape of a string. Decoding escapes (surrogate pairs
        // included) and rejecting raw control characters is left to serde_json.
        let string = none_of("\\\"")
            .ignored()
            .or(escape)
            .repeated()
            .delimited_by(just('"'), just('"'))
            .to_slice()
            .try_map(|quoted: &str, span| {
                serde_json::from_str::<String>(quoted).map_err(|e| Rich::custom(span, e))
            })
            .boxed()
            .labelled("string");

        let array = value
            .clone()
            .separated_by(just(',').padded_by(whitespace()))
            .collect::<Vec<_>>()
            .padded_by(whitespace())
            .delimited_by(just('['), just(']'))
            .boxed()
            .labelled("array");

        let member = string
            .clone()
            .map_with(|val, e| Spanned {
                span: e.span(),
                val,
            })
            .then_ignore(just(':').padded_by(whitespace()))
            .then(value)
            .labelled("object member");
        let object = member
            .separated_by(just(',').padded_by(whitespace()))
            .collect::<Vec<_>>()
            .padded_by(whitespace())
            .delimited_by(just('{'), just('}'))
            .boxed()
            .labelled("object");

        choice((
            just("null").to(Json::Null).labelled("null"),
            just("true").to(Json::Bool(true)).labelled("true"),
            just("false").to(Json::Bool(false)).labelled("false"),
            number.map(Json::Num),
            string.map(Json::Str),
            array.map(Json::Array),
            object.map(Json::Object),
        ))
        .recover_with(via_parser(nested_delimiters(
            '{',
            '}',
            [('[', ']')],
            |_| Json::Invalid,
        )))
        .recover_with(via_parser(nested_delimiters(
            '[',
            ']',
            [('{', '}')],
            |_| Json::Invalid,
        )))
        .map_with(|val, e| Spanned {
            span: e.span(),
            val,
        })
        .padded_by(whitespace())
    })
    .labelled("JSON value")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Spanned<Json> {
        let (output, errors) = parser().parse(src).into_output_errors();
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        output.expect("output without errors")
    }

    #[test]
    fn numbers_keep_their_text() {
        assert_eq!(parse("3").val, Json::Num("3".to_owned()));
        assert_eq!(parse("-3.50e+2").val, Json::Num("-3.50e+2".to_owned()));
    }

    #[test]
    fn strings_are_unescaped() {
        assert_eq!(parse(r#""a\nb""#).val, Json::Str("a\nb".to_owned()));
        assert_eq!(parse(r#""é""#).val, Json::Str("é".to_owned()));
        assert_eq!(parse(r#""😀""#).val, Json::Str("😀".to_owned()));
    }

    #[test]
    fn lone_surrogate_is_rejected() {
        let (_, errors) = parser().parse(r#""\ud83d""#).into_output_errors();
        assert!(!errors.is_empty());
    }

    #[test]
    fn spans_exclude_surrounding_whitespace() {
        let tree = parse(r#"  { "key" : [ 1 , true ] }  "#);
        assert_eq!(tree.range(), 2..26);
        let Json::Object(members) = &tree.val else {
            panic!("expected an object, found {}", tree.val.kind_desc());
        };
        let (key, value) = &members[0];
        assert_eq!(key.val, "key");
        assert_eq!(key.range(), 4..9);
        assert_eq!(value.range(), 12..24);
    }

    #[test]
    fn duplicate_members_are_kept() {
        let tree = parse(r#"{"a": 1, "a": 2}"#);
        let Json::Object(members) = &tree.val else {
            panic!("expected an object");
        };
        assert_eq!(members.len(), 2);
    }

    #[test]
    fn only_json_whitespace_is_skipped() {
        assert_eq!(parse(" \t\r\n[ 1 ,\n2 ]\r\n").val.kind_desc(), "array");
        for src in ["\u{a0}1", "1\u{3000}", "[1,\u{2028}2]", "{\u{a0}\"a\": 1}"] {
            let (_, errors) = parser().parse(src).into_output_errors();
            assert!(!errors.is_empty(), "{src:?}");
        }
    }

    #[test]
    fn leading_zeros_are_rejected() {
        let (_, errors) = parser().parse("01").into_output_errors();
        assert!(!errors.is_empty());
    }

    #[test]
    fn broken_nested_array_is_recovered() {
        let (output, errors) = parser().parse("[[1 2], 3]").into_output_errors();
        assert!(!errors.is_empty());
        if let Some(Spanned {
            val: Json::Array(items),
            ..
        }) = output
        {
            assert_eq!(items.len(), 2);
            assert_eq!(items[0].val, Json::Invalid);
            assert_eq!(items[1].val, Json::Num("3".to_owned()));
        }
    }
}
