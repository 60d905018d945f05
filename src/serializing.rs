use crate::dom_tree::{child_ids_in, Node, NodeData, NodeId, NodeRef};
use html5ever::serialize::TraversalScope::{ChildrenOnly, IncludeNode};
use html5ever::serialize::{Serialize, Serializer, TraversalScope};
use markup5ever::QualName;
use std::io;

enum SerializeOp {
    Open(NodeId),
    Close(QualName),
}

/// A node handle that html5ever's serializer can walk.
pub struct SerializableNodeRef<'a>(Node<'a>);

impl<'a> From<NodeRef<'a, NodeData>> for SerializableNodeRef<'a> {
    fn from(h: NodeRef<'a, NodeData>) -> SerializableNodeRef<'a> {
        SerializableNodeRef(h)
    }
}

impl<'a> Serialize for SerializableNodeRef<'a> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let nodes = self.0.tree.borrow_nodes();
        let id = self.0.id;
        let mut ops = match traversal_scope {
            IncludeNode => vec![SerializeOp::Open(id)],
            ChildrenOnly(_) => child_ids_in(&nodes, &id)
                .into_iter()
                .rev()
                .map(SerializeOp::Open)
                .collect(),
        };

        while let Some(op) = ops.pop() {
            match op {
                SerializeOp::Open(id) => {
                    let node = match nodes.get(id.value()) {
                        Some(node) => node,
                        None => continue,
                    };

                    match node.data {
                        NodeData::Element(ref e) => {
                            serializer.start_elem(
                                e.name.clone(),
                                e.attrs.iter().map(|at| (&at.name, &at.value[..])),
                            )?;

                            ops.push(SerializeOp::Close(e.name.clone()));

                            let children = child_ids_in(&nodes, &id);
                            ops.extend(children.into_iter().rev().map(SerializeOp::Open));
                        }

                        NodeData::Doctype { ref name, .. } => serializer.write_doctype(name)?,
                        NodeData::Text { ref contents } => serializer.write_text(contents)?,
                        NodeData::Comment { ref contents } => serializer.write_comment(contents)?,
                        NodeData::ProcessingInstruction {
                            ref target,
                            ref contents,
                        } => serializer.write_processing_instruction(target, contents)?,

                        // The document node only contributes its children.
                        NodeData::Document => {
                            let children = child_ids_in(&nodes, &id);
                            ops.extend(children.into_iter().rev().map(SerializeOp::Open));
                        }
                    }
                }

                SerializeOp::Close(name) => serializer.end_elem(name)?,
            }
        }

        Ok(())
    }
}
