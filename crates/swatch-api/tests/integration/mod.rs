mod colours;
mod copy_list;
