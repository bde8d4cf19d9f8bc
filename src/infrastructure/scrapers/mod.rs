pub(crate) mod day_view;
