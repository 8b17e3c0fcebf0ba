pub mod jobsearch;
