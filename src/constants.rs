//! Constants for the editor frontend.
//!
//! Centralizes commonly used string literals and canvas geometry so they
//! can be changed in one place.

// Element IDs (commonly referenced)
pub const ID_EDITOR_ROOT: &str = "editor-root";
pub const ID_CANVAS_CONTAINER: &str = "canvas-container";
pub const ID_WORKFLOW_CANVAS: &str = "workflow-canvas";
pub const ID_NODE_PALETTE: &str = "node-palette";
pub const ID_CONFIG_PANEL: &str = "config-panel";
pub const ID_DEPLOY_BUTTON: &str = "deploy-button";
pub const ID_CLEAR_BUTTON: &str = "clear-button";
pub const ID_DEPLOY_OUTPUT: &str = "deploy-output";

// Drag payload MIME types
pub const DRAG_MIME_PALETTE: &str = "application/json";
pub const DRAG_MIME_FALLBACK: &str = "text/plain";

// Node geometry. Nodes are fixed-size; position is the only per-node
// spatial state the graph model carries.
pub const NODE_WIDTH: f64 = 200.0;
pub const NODE_HEIGHT: f64 = 80.0;
pub const PORT_RADIUS: f64 = 6.0;
pub const PORT_HIT_RADIUS: f64 = 9.0;

// Canvas colors
pub const CANVAS_BACKGROUND_COLOR: &str = "#1e1e2e";
pub const NODE_FILL_COLOR: &str = "#ffffff";
pub const NODE_BORDER_DEFAULT: &str = "#e0e0e0";
pub const NODE_BORDER_SELECTED: &str = "#3498db";
pub const NODE_TEXT_COLOR: &str = "#2c3e50";
pub const NODE_SUBTEXT_COLOR: &str = "#6b7280";
pub const CONNECTION_LINE_COLOR: &str = "#95a5a6";
pub const CONNECTION_PREVIEW_COLOR: &str = "#3b82f6";
pub const PORT_FILL_COLOR: &str = "#64748b";
pub const PORT_HOVER_COLOR: &str = "#3b82f6";
pub const SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.15)";

// Accent colors per node family
pub const ACCENT_TRIGGER: &str = "#f59e0b";
pub const ACCENT_AGENT: &str = "#6366f1";
pub const ACCENT_TOOL: &str = "#10b981";

// Title truncation limit for node labels drawn on canvas (graphemes).
pub const NODE_LABEL_MAX_GRAPHEMES: usize = 22;

// Deployment snippet defaults. The host can be overridden when the
// exporter is constructed.
pub const DEFAULT_CDN_HOST: &str = "https://cdn.mlstudio.dev";
