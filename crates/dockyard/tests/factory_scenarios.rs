//! End-to-end factory scenarios: floating windows, conversions, locator
//! resolution and split dispatch.

use std::sync::{Arc, Mutex};

use dockyard::{
    Context, DockError, DockFactory, DockHost, DockKind, DockNode, DockOperation, DockSide,
    DockTree, FactoryConfig, Host, LayoutBuilder, NodeId, Orientation, Point, Size, SplitDispatch,
    WrapSplitLayout,
};

#[derive(Debug, Default)]
struct RecordingHost {
    calls: Mutex<Vec<String>>,
}

impl RecordingHost {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

impl DockHost for RecordingHost {
    fn present(&self, is_dialog: bool) {
        self.push(format!("present {is_dialog}"));
    }

    fn exit(&self) {
        self.push("exit".to_string());
    }

    fn set_position(&self, position: Point) {
        self.push(format!("position {} {}", position.x, position.y));
    }

    fn position(&self) -> Point {
        Point::new(12.0, 34.0)
    }

    fn set_size(&self, size: Size) {
        self.push(format!("size {} {}", size.width, size.height));
    }

    fn size(&self) -> Size {
        Size::new(800.0, 600.0)
    }

    fn set_title(&self, title: &str) {
        self.push(format!("title {title}"));
    }

    fn set_layout(&self, layout: Option<NodeId>) {
        self.push(format!("layout {}", layout.map_or(0, NodeId::get)));
    }
}

struct Workspace {
    tree: DockTree,
    root: NodeId,
    strip: NodeId,
    views: Vec<NodeId>,
}

/// Root → Strip → [Editor, Output, Search], stamped by `factory`.
fn workspace(factory: &DockFactory) -> Workspace {
    let mut tree = DockTree::new();
    let root = tree.insert(DockNode::named(DockKind::Root));
    let strip = tree.insert(DockNode::named(DockKind::Strip));
    tree.push_view(root, strip).unwrap();
    let views = ["Editor", "Output", "Search"]
        .into_iter()
        .map(|id| {
            let view = tree.insert(DockNode::new(DockKind::View).with_id(id).with_title(id));
            tree.push_view(strip, view).unwrap();
            view
        })
        .collect();
    factory.update(&mut tree, root, None, None).unwrap();
    Workspace {
        tree,
        root,
        strip,
        views,
    }
}

fn hosted_factory(host: Arc<RecordingHost>) -> DockFactory {
    DockFactory::new(FactoryConfig::new().host_locator("DockWindow", move || host.clone() as Host))
}

#[test]
fn create_window_builds_three_level_skeleton() {
    let host = Arc::new(RecordingHost::default());
    let factory = hosted_factory(host.clone());
    let Workspace {
        mut tree,
        root,
        strip,
        views,
    } = workspace(&factory);
    let context: Context = Arc::new("floating");

    let window = factory
        .create_window(&mut tree, root, views[1], Some(context.clone()))
        .unwrap();

    assert_eq!(tree.children(strip), &[views[0], views[2]]);
    assert_eq!(tree.node(root).unwrap().windows(), &[window]);

    let record = tree.window(window).unwrap();
    assert_eq!(record.id, "DockWindow");
    assert_eq!(record.title, "DockWindow");
    assert_eq!(record.owner(), Some(root));
    assert_eq!(record.factory(), Some(factory.id()));
    assert!(Arc::ptr_eq(record.context().unwrap(), &context));
    assert!(record.host().is_some());

    let window_root = record.layout().unwrap();
    let window_root_node = tree.node(window_root).unwrap();
    assert_eq!(window_root_node.kind(), DockKind::Root);
    assert_eq!(window_root_node.id(), "DockRoot");
    assert_eq!(window_root_node.parent(), None);
    let window_strip = window_root_node.views()[0];
    assert_eq!(window_root_node.views(), &[window_strip]);
    assert_eq!(window_root_node.current_view(), Some(window_strip));
    assert_eq!(window_root_node.default_view(), Some(window_strip));

    let window_strip_node = tree.node(window_strip).unwrap();
    assert_eq!(window_strip_node.kind(), DockKind::Strip);
    assert_eq!(window_strip_node.id(), "DockStrip");
    assert_eq!(window_strip_node.views(), &[views[1]]);
    assert_eq!(window_strip_node.current_view(), Some(views[1]));
    assert_eq!(tree.node(views[1]).unwrap().parent(), Some(window_strip));
    assert!(tree.validate().is_ok());

    tree.window(window).unwrap().present(false);
    let calls = host.calls();
    assert_eq!(calls.first().map(String::as_str), Some("position 0 0"));
    assert!(calls.contains(&format!("layout {}", window_root.get())));
    assert_eq!(calls.last().map(String::as_str), Some("present false"));
}

#[test]
fn window_exit_saves_host_geometry() {
    let host = Arc::new(RecordingHost::default());
    let factory = hosted_factory(host.clone());
    let Workspace {
        mut tree,
        root,
        views,
        ..
    } = workspace(&factory);
    let window = factory.create_window(&mut tree, root, views[0], None).unwrap();

    let record = tree.window_mut(window).unwrap();
    record.exit();

    assert_eq!((record.x, record.y), (12.0, 34.0));
    assert_eq!((record.width, record.height), (800.0, 600.0));
    assert_eq!(host.calls(), vec!["exit"]);
}

#[test]
fn create_window_without_host_locator_fails_after_attaching() {
    let factory = DockFactory::default();
    let Workspace {
        mut tree,
        root,
        views,
        ..
    } = workspace(&factory);

    let err = factory
        .create_window(&mut tree, root, views[0], None)
        .unwrap_err();

    assert_eq!(
        err,
        DockError::HostNotRegistered {
            id: "DockWindow".to_string()
        }
    );
    // Completed steps are kept.
    assert_eq!(tree.node(root).unwrap().windows().len(), 1);
}

#[test]
fn create_window_inside_content_is_rejected() {
    let host = Arc::new(RecordingHost::default());
    let factory = hosted_factory(host);
    let Workspace {
        mut tree,
        strip,
        views,
        ..
    } = workspace(&factory);

    assert_eq!(
        factory.create_window(&mut tree, views[0], strip, None),
        Err(DockError::AncestorConflict {
            ancestor: strip,
            descendant: views[0],
        })
    );
}

#[test]
fn convert_copies_fields_per_kind() {
    let host = Arc::new(RecordingHost::default());
    let factory = hosted_factory(host);

    for kind in DockKind::ALL {
        let Workspace {
            mut tree,
            root,
            strip,
            views,
        } = workspace(&factory);
        tree.set_current_view(strip, Some(views[2])).unwrap();
        tree.set_default_view(strip, Some(views[0])).unwrap();
        let floating = factory.add_view(&mut tree, root).unwrap();
        let window = factory.create_window(&mut tree, strip, floating, None).unwrap();
        {
            let source = tree.node_mut(strip).unwrap();
            source.dock = DockSide::Bottom;
            source.width = 240.0;
            source.height = 120.0;
            source.dockable_mut().set_title("Tools");
        }

        let converted = factory
            .convert(&mut tree, strip, kind)
            .unwrap()
            .expect("attached strip converts");
        let fields = kind.conversion_fields();
        let node = tree.node(converted).unwrap();

        assert_eq!(node.kind(), kind);
        assert_eq!(node.id(), "DockStrip", "{kind}");
        assert_eq!(node.title(), "Tools", "{kind}");
        assert_eq!(node.dock, DockSide::Bottom, "{kind}");
        assert_eq!(node.width, 240.0, "{kind}");
        assert_eq!(node.height, 120.0, "{kind}");
        assert_eq!(node.parent(), Some(root), "{kind}");
        assert_eq!(tree.children(root)[0], converted, "{kind}");

        if fields.views {
            assert_eq!(node.views(), views.as_slice(), "{kind}");
            assert_eq!(node.current_view(), Some(views[2]), "{kind}");
            assert_eq!(node.default_view(), Some(views[0]), "{kind}");
            assert_eq!(tree.node(views[0]).unwrap().parent(), Some(converted));
        } else {
            assert!(node.views().is_empty(), "{kind}");
            assert_eq!(node.current_view(), None, "{kind}");
            assert_eq!(node.default_view(), None, "{kind}");
        }
        if fields.windows {
            assert_eq!(node.windows(), &[window], "{kind}");
            assert_eq!(tree.window(window).unwrap().owner(), Some(converted));
        } else {
            assert!(node.windows().is_empty(), "{kind}");
        }
        assert!(tree.validate().is_ok(), "{kind}");
    }
}

#[test]
fn detached_nodes_are_left_alone() {
    let factory = DockFactory::default();
    let mut tree = DockTree::new();
    let lonely = tree.insert(DockNode::named(DockKind::View));
    let other = tree.insert(DockNode::named(DockKind::View));
    let snapshot = format!("{tree:?}");

    factory.replace(&mut tree, lonely, other).unwrap();
    assert_eq!(factory.insert_view_before(&mut tree, lonely), Ok(None));
    assert_eq!(factory.insert_view_after(&mut tree, lonely), Ok(None));
    assert_eq!(factory.insert_root_before(&mut tree, lonely), Ok(None));
    factory.remove(&mut tree, lonely).unwrap();
    factory.move_node(&mut tree, lonely, other).unwrap();

    assert_eq!(format!("{tree:?}"), snapshot);
}

#[test]
fn replace_with_same_node_changes_nothing() {
    let factory = DockFactory::default();
    let Workspace {
        mut tree,
        strip,
        views,
        ..
    } = workspace(&factory);

    factory.replace(&mut tree, views[1], views[1]).unwrap();

    assert_eq!(tree.children(strip), views.as_slice());
    assert_eq!(tree.node(views[1]).unwrap().parent(), Some(strip));
    assert!(tree.validate().is_ok());
}

#[test]
fn replace_cannot_put_container_inside_itself() {
    let factory = DockFactory::default();
    let Workspace {
        mut tree,
        root,
        strip,
        views,
    } = workspace(&factory);
    let snapshot = format!("{tree:?}");

    let err = factory.replace(&mut tree, views[0], strip).unwrap_err();

    assert!(matches!(err, DockError::AncestorConflict { .. }), "{err}");
    assert_eq!(format!("{tree:?}"), snapshot);
    assert_eq!(tree.children(root), &[strip]);
    assert!(tree.validate().is_ok());
}

#[test]
fn convert_of_root_leaves_tree_intact() {
    let factory = DockFactory::default();
    let Workspace {
        mut tree,
        root,
        strip,
        views,
    } = workspace(&factory);
    let snapshot = format!("{tree:?}");

    for kind in DockKind::ALL {
        assert_eq!(factory.convert(&mut tree, root, kind), Ok(None), "{kind}");
    }

    assert_eq!(format!("{tree:?}"), snapshot);
    assert_eq!(tree.children(root), &[strip]);
    assert_eq!(tree.node(views[0]).unwrap().parent(), Some(strip));
}

#[test]
fn move_to_same_parent_puts_node_last_and_selects_it() {
    let factory = DockFactory::default();
    let Workspace {
        mut tree,
        strip,
        views,
        ..
    } = workspace(&factory);

    factory.move_node(&mut tree, views[0], strip).unwrap();

    assert_eq!(tree.children(strip), &[views[1], views[2], views[0]]);
    assert_eq!(tree.node(strip).unwrap().current_view(), Some(views[0]));
    assert_eq!(tree.node(views[0]).unwrap().parent(), Some(strip));
    assert!(tree.validate().is_ok());
}

#[test]
fn update_resolves_context_per_id() {
    let editor_context: Context = Arc::new("editor view-model");
    let fallback: Context = Arc::new("workspace");
    let editor_for_locator = editor_context.clone();
    let factory = DockFactory::new(
        FactoryConfig::new()
            .context_locator("Editor", move || Some(editor_for_locator.clone()))
            .context_locator("Search", || None),
    );
    let Workspace {
        mut tree,
        root,
        strip,
        views,
    } = workspace(&factory);

    factory.update(&mut tree, root, Some(fallback.clone()), None).unwrap();

    let context_of = |id: NodeId| tree.node(id).unwrap().context().cloned();
    assert!(Arc::ptr_eq(&context_of(root).unwrap(), &fallback));
    assert!(Arc::ptr_eq(&context_of(strip).unwrap(), &fallback));
    assert!(Arc::ptr_eq(&context_of(views[0]).unwrap(), &editor_context));
    assert!(Arc::ptr_eq(&context_of(views[1]).unwrap(), &fallback));
    assert!(context_of(views[2]).is_none());
    for id in [root, strip, views[0], views[1], views[2]] {
        assert_eq!(tree.node(id).unwrap().factory(), Some(factory.id()));
    }
}

#[test]
fn update_passes_incoming_context_past_locator_hits() {
    let strip_context: Context = Arc::new("strip only");
    let fallback: Context = Arc::new("workspace");
    let for_locator = strip_context.clone();
    let factory = DockFactory::new(
        FactoryConfig::new().context_locator("DockStrip", move || Some(for_locator.clone())),
    );
    let Workspace {
        mut tree,
        root,
        strip,
        views,
    } = workspace(&factory);

    factory.update(&mut tree, root, Some(fallback.clone()), None).unwrap();

    let strip_node = tree.node(strip).unwrap();
    assert!(Arc::ptr_eq(strip_node.context().unwrap(), &strip_context));
    let child = tree.node(views[1]).unwrap();
    assert!(Arc::ptr_eq(child.context().unwrap(), &fallback));
}

#[test]
fn split_wrappers_follow_dispatch_policy() {
    let cases = [
        (SplitDispatch::Directional, DockOperation::Bottom),
        (SplitDispatch::LegacyLeft, DockOperation::Left),
    ];
    for (dispatch, expected) in cases {
        let factory = DockFactory::new(FactoryConfig::new().split_dispatch(dispatch));
        let Workspace {
            mut tree,
            strip,
            views,
            ..
        } = workspace(&factory);
        tree.node_mut(views[0])
            .unwrap()
            .set_split_layout(Some(Arc::new(WrapSplitLayout)));

        factory.split_to_bottom(&mut tree, views[0]).unwrap();

        let layout = tree.children(strip)[0];
        let layout_node = tree.node(layout).unwrap();
        assert_eq!(layout_node.kind(), DockKind::Layout, "{dispatch:?}");
        let new_strip = match expected {
            DockOperation::Left => {
                assert_eq!(layout_node.orientation, Orientation::Horizontal);
                assert_eq!(layout_node.views()[2], views[0]);
                layout_node.views()[0]
            }
            _ => {
                assert_eq!(layout_node.orientation, Orientation::Vertical);
                assert_eq!(layout_node.views()[0], views[0]);
                layout_node.views()[2]
            }
        };
        assert_eq!(tree.node(new_strip).unwrap().dock, expected.side());
        assert_eq!(tree.node(views[0]).unwrap().parent(), Some(layout));
        assert!(tree.validate().is_ok());
    }
}

#[test]
fn split_keeps_selection_on_wrapped_node() {
    let factory = DockFactory::default();
    let Workspace {
        mut tree,
        strip,
        views,
        ..
    } = workspace(&factory);
    tree.set_current_view(strip, Some(views[1])).unwrap();
    tree.node_mut(views[1])
        .unwrap()
        .set_split_layout(Some(Arc::new(WrapSplitLayout)));

    factory.split_to_left(&mut tree, views[1]).unwrap();

    let layout = tree.children(strip)[1];
    assert_eq!(tree.node(strip).unwrap().current_view(), Some(layout));
    assert_eq!(tree.node(layout).unwrap().current_view(), Some(views[1]));
}

struct TwoPaneLayout;

impl LayoutBuilder for TwoPaneLayout {
    fn create_layout(
        &self,
        _factory: &DockFactory,
        tree: &mut DockTree,
    ) -> Result<NodeId, DockError> {
        let root = tree.insert(DockNode::named(DockKind::Root));
        let layout = tree.insert(DockNode::named(DockKind::Layout));
        tree.push_view(root, layout)?;
        tree.set_default_view(root, Some(layout))?;
        for id in ["Explorer", "Editor"] {
            let strip = tree.insert(DockNode::named(DockKind::Strip));
            let view = tree.insert(DockNode::new(DockKind::View).with_id(id));
            tree.push_view(strip, view)?;
            tree.set_default_view(strip, Some(view))?;
            tree.push_view(layout, strip)?;
        }
        Ok(root)
    }
}

#[test]
fn build_layout_initializes_selection() {
    let factory = DockFactory::default();
    let mut tree = DockTree::new();

    let root = factory.build_layout(&TwoPaneLayout, &mut tree, None).unwrap();

    let root_node = tree.node(root).unwrap();
    let layout = root_node.views()[0];
    assert_eq!(root_node.current_view(), Some(layout));
    for strip in tree.children(layout) {
        let strip = tree.node(*strip).unwrap();
        assert_eq!(strip.current_view(), strip.default_view());
        assert_eq!(strip.parent(), Some(layout));
    }
    assert!(tree.validate().is_ok());
}
