use crate::error::{Error, Result};

const SELF_CLOSING: &str = "img";

/// Ordered attribute list, rendered as `name='value'` pairs in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Props(Vec<(String, String)>);

impl Props {
    pub fn new() -> Self {
        Props(Vec::new())
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((name.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_html(&self) -> String {
        self.0
            .iter()
            .map(|(name, value)| format!("{}='{}'", name, value))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Anything that can be written out as HTML text.
pub trait ToHtml {
    fn to_html(&self) -> Result<String>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextNode {
    pub tag: Option<String>,
    pub value: String,
    pub props: Props,
}

impl TextNode {
    pub fn raw(value: impl Into<String>) -> Self {
        TextNode {
            tag: None,
            value: value.into(),
            props: Props::new(),
        }
    }

    pub fn tagged(tag: impl Into<String>, value: impl Into<String>, props: Props) -> Self {
        TextNode {
            tag: Some(tag.into()),
            value: value.into(),
            props,
        }
    }
}

impl ToHtml for TextNode {
    fn to_html(&self) -> Result<String> {
        let tag = match &self.tag {
            None => return Ok(self.value.clone()),
            Some(tag) => tag,
        };
        let props = self.props.to_html();
        if tag == SELF_CLOSING {
            return Ok(if props.is_empty() {
                format!("<{} />", tag)
            } else {
                format!("<{} {} />", tag, props)
            });
        }
        if self.value.is_empty() {
            return Err(Error::MissingValue { tag: tag.clone() });
        }
        Ok(format!("{}{}</{}>", open_tag(tag, &props), self.value, tag))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParentNode {
    pub tag: String,
    pub children: Vec<Node>,
    pub props: Props,
}

impl ParentNode {
    pub fn new(tag: impl Into<String>, children: Vec<Node>, props: Props) -> Result<Self> {
        let tag = tag.into();
        if children.is_empty() {
            return Err(Error::EmptyChildren { tag });
        }
        Ok(ParentNode {
            tag,
            children,
            props,
        })
    }
}

impl ToHtml for ParentNode {
    fn to_html(&self) -> Result<String> {
        if self.tag.is_empty() {
            return Err(Error::MissingTag);
        }
        let mut html = open_tag(&self.tag, &self.props.to_html());
        for child in &self.children {
            html.push_str(&child.to_html()?);
        }
        html.push_str(&format!("</{}>", self.tag));
        Ok(html)
    }
}

fn open_tag(tag: &str, props: &str) -> String {
    if props.is_empty() {
        format!("<{}>", tag)
    } else {
        format!("<{} {}>", tag, props)
    }
}

/// A node of the output HTML tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Text(TextNode),
    Parent(ParentNode),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(TextNode::raw(value))
    }

    pub fn leaf(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Node::Text(TextNode::tagged(tag, value, Props::new()))
    }

    pub fn leaf_with(tag: impl Into<String>, value: impl Into<String>, props: Props) -> Self {
        Node::Text(TextNode::tagged(tag, value, props))
    }

    pub fn parent(tag: impl Into<String>, children: Vec<Node>) -> Result<Self> {
        ParentNode::new(tag, children, Props::new()).map(Node::Parent)
    }

    pub fn parent_with(tag: impl Into<String>, children: Vec<Node>, props: Props) -> Result<Self> {
        ParentNode::new(tag, children, props).map(Node::Parent)
    }
}

impl ToHtml for Node {
    fn to_html(&self) -> Result<String> {
        match self {
            Node::Text(node) => node.to_html(),
            Node::Parent(node) => node.to_html(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::Error;
    use crate::node::*;

    #[test]
    fn test_props_to_html() {
        let props = Props::new()
            .with("src", "image.jpg")
            .with("alt", "An image");
        assert_eq!(props.to_html(), "src='image.jpg' alt='An image'");
        assert_eq!(Props::new().to_html(), "");
    }

    #[test]
    fn test_text_node() {
        assert_eq!(Node::text("just <text>").to_html().unwrap(), "just <text>");
        assert_eq!(Node::text("").to_html().unwrap(), "");
        assert_eq!(Node::leaf("b", "bold").to_html().unwrap(), "<b>bold</b>");
        assert_eq!(
            Node::leaf_with("a", "boot", Props::new().with("href", "https://boot.dev"))
                .to_html()
                .unwrap(),
            "<a href='https://boot.dev'>boot</a>"
        );
    }

    #[test]
    fn test_self_closing_image() {
        let img = Node::leaf_with(
            "img",
            "",
            Props::new().with("src", "u.png").with("alt", "alt"),
        );
        assert_eq!(img.to_html().unwrap(), "<img src='u.png' alt='alt' />");
        assert_eq!(Node::leaf("img", "").to_html().unwrap(), "<img />");
    }

    #[test]
    fn test_tagged_text_requires_value() {
        assert!(matches!(
            Node::leaf("i", "").to_html(),
            Err(Error::MissingValue { tag }) if tag == "i"
        ));
    }

    #[test]
    fn test_parent_node() {
        let node = Node::parent(
            "p",
            vec![
                Node::leaf("b", "Bold text"),
                Node::text("Normal text"),
                Node::leaf("i", "italic text"),
                Node::text("Normal text"),
            ],
        )
        .unwrap();
        assert_eq!(
            node.to_html().unwrap(),
            "<p><b>Bold text</b>Normal text<i>italic text</i>Normal text</p>"
        );
    }

    #[test]
    fn test_nested_parent_with_props() {
        let inner = Node::parent("span", vec![Node::text("x")]).unwrap();
        let outer =
            Node::parent_with("div", vec![inner], Props::new().with("class", "box")).unwrap();
        assert_eq!(
            outer.to_html().unwrap(),
            "<div class='box'><span>x</span></div>"
        );
    }

    #[test]
    fn test_parent_requires_children() {
        for tag in ["p", "div", ""] {
            assert!(matches!(
                Node::parent(tag, vec![]),
                Err(Error::EmptyChildren { .. })
            ));
        }
    }

    #[test]
    fn test_parent_requires_tag() {
        let node = Node::parent("", vec![Node::text("x")]).unwrap();
        assert!(matches!(node.to_html(), Err(Error::MissingTag)));
    }

    #[test]
    fn test_error_in_child_propagates() {
        let node = Node::parent("p", vec![Node::text("ok"), Node::leaf("code", "")]).unwrap();
        assert!(matches!(
            node.to_html(),
            Err(Error::MissingValue { tag }) if tag == "code"
        ));
    }
}
