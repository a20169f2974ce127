use crate::template::{Segment, Template};

#[test]
fn single_quoted_renders_around_argument() {
    let template = Template::single_quoted();
    assert_eq!(template.render("{}"), "'{}'");
    assert_eq!(template.render("%s"), "'%s'");
    assert_eq!(template.placeholder_count(), 1);
}

#[test]
fn adjacent_literals_merge() {
    let template = Template::new([
        Segment::Literal("<".to_string()),
        Segment::Literal("<".to_string()),
        Segment::Placeholder,
        Segment::Literal(String::new()),
        Segment::Literal(">>".to_string()),
    ]);
    assert_eq!(
        template.segments(),
        &[
            Segment::Literal("<<".to_string()),
            Segment::Placeholder,
            Segment::Literal(">>".to_string()),
        ]
    );
}

#[test]
fn rendered_output_has_no_placeholder_left() {
    let template = Template::new([
        Segment::Literal("`".to_string()),
        Segment::Placeholder,
        Segment::Literal("'".to_string()),
    ]);
    let rendered = template.render("{}");
    assert_eq!(rendered, "`{}'");
    assert_eq!(rendered.matches("{}").count(), 1);
}

#[test]
fn describe_marks_placeholder() {
    assert_eq!(Template::single_quoted().describe(), r#""'"<x>"'""#);
}
