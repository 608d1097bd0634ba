/////////////////////////////TESTS////////////////////////////////////////////////////
/*
tests of the task document parser:
identifiers and values
key-value lines
sections and whole documents
comments
templates and unknown keys
malformed documents
*/

#[cfg(test)]
mod tests {
    use crate::Utils::task_parser::{
        DocumentMap, Value, parse_document, parse_document_with_template, parse_identifier,
        parse_key_value_pair, parse_section, parse_value, parse_value_list, unknown_keys,
    };
    use std::collections::HashMap;

    #[test]
    fn test_parse_identifier() {
        let (remaining, title) = parse_identifier("refinement\n method: hash").unwrap();
        assert_eq!(title, "refinement");
        assert_eq!(remaining, "\n method: hash");

        let (remaining, key) = parse_identifier("top_percent: 0.3").unwrap();
        assert_eq!(key, "top_percent");
        assert_eq!(remaining, ": 0.3");

        assert!(parse_identifier("3classes").is_err());
    }

    #[test]
    fn test_parse_value() {
        let (remaining, value) = parse_value("multiple_class, hash").unwrap();
        assert_eq!(value, Value::String("multiple_class".to_string()));
        assert_eq!(remaining, ", hash");

        let (_, value) = parse_value("12").unwrap();
        assert_eq!(value, Value::Integer(12));

        let (_, value) = parse_value("0.25\n").unwrap();
        assert_eq!(value, Value::Float(0.25));

        let (_, value) = parse_value("false").unwrap();
        assert_eq!(value, Value::Boolean(false));
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Integer(3).as_float(), Some(3.0));
        assert_eq!(Value::Float(0.5).as_integer(), None);
        assert_eq!(Value::Boolean(true).as_boolean(), Some(true));
        assert_eq!(Value::String("a".to_string()).as_string().unwrap(), "a");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_parse_value_list_and_pair() {
        let (remaining, values) = parse_value_list("1, 2.5 ,info\nnext").unwrap();
        assert_eq!(
            values,
            vec![
                Value::Integer(1),
                Value::Float(2.5),
                Value::String("info".to_string())
            ]
        );
        assert_eq!(remaining, "\nnext");

        let (_, (key, values)) = parse_key_value_pair("threshold : 0.001").unwrap();
        assert_eq!(key, "threshold");
        assert_eq!(values, vec![Value::Float(0.001)]);
    }

    #[test]
    fn test_parse_section() {
        let (remaining, (title, section)) =
            parse_section("refinement\n  method: hash\n  classes: 2\nlogging\n").unwrap();
        assert_eq!(title, "refinement");
        assert_eq!(section.len(), 2);
        assert_eq!(
            section["classes"].as_ref().unwrap(),
            &vec![Value::Integer(2)]
        );
        assert_eq!(remaining.trim(), "logging");
    }

    #[test]
    fn test_parse_document_with_comments() {
        let input = "
            # multi-class refinement task
            refinement
              method: multiple_class
              // fraction of the dominant density
              top_percent: 0.3
            logging
              loglevel: debug
        ";
        let document = parse_document(input).unwrap();
        assert_eq!(document.len(), 2);
        assert_eq!(
            document["refinement"]["top_percent"].as_ref().unwrap()[0],
            Value::Float(0.3)
        );
        assert_eq!(
            document["logging"]["loglevel"].as_ref().unwrap()[0],
            Value::String("debug".to_string())
        );
    }

    #[test]
    fn test_malformed_document() {
        assert!(parse_document("").is_err());
        assert!(parse_document("refinement\n").is_err());
        assert!(parse_document("refinement\n method: hash\n :oops").is_err());
    }

    #[test]
    fn test_template_and_unknown_keys() {
        let mut template: DocumentMap = HashMap::new();
        template.insert(
            "refinement".to_string(),
            HashMap::from([("method".to_string(), None), ("classes".to_string(), None)]),
        );
        template.insert(
            "logging".to_string(),
            HashMap::from([("loglevel".to_string(), None)]),
        );
        let input = "refinement\n method: hash\n colour: red\n";
        let document = parse_document_with_template(input, &template).unwrap();
        assert!(document["refinement"]["classes"].is_none());
        assert!(document["logging"]["loglevel"].is_none());
        assert_eq!(unknown_keys(&document, &template), vec!["refinement.colour".to_string()]);
    }
}
