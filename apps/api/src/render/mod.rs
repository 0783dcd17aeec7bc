// Presentation of committed page sets outside the editor (print export).

pub mod html;
