/// UI module exports

pub mod components;
pub mod notes;
pub mod qna;
